use crate::cmd::open_repo;
use crate::output::{or_dash, print_json, print_table};
use anyhow::Context;
use clap::Subcommand;
use hotel_core::{booking::add_client, record::Client};
use std::path::Path;

#[derive(Subcommand)]
pub enum ClientSubcommand {
    /// Register a client
    Add {
        /// 10-digit national ID
        cedula: String,
        /// Full name
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: Option<String>,
    },
    /// List clients
    List,
}

pub fn run(root: &Path, subcmd: ClientSubcommand, json: bool) -> anyhow::Result<()> {
    match subcmd {
        ClientSubcommand::Add {
            cedula,
            name,
            email,
        } => {
            let repo = open_repo(root)?;
            let client = add_client(
                &repo,
                Client {
                    cedula: Some(cedula),
                    nombre: Some(name),
                    correo: email,
                    ..Default::default()
                },
            )
            .context("client rejected")?;
            if json {
                print_json(&client)?;
            } else {
                println!(
                    "Added client {}.",
                    client.nombre.as_deref().unwrap_or_default()
                );
            }
            Ok(())
        }
        ClientSubcommand::List => {
            let repo = open_repo(root)?;
            let clients = repo.clients().context("failed to read clients")?.records;
            if json {
                return print_json(&clients);
            }
            if clients.is_empty() {
                println!("No clients.");
                return Ok(());
            }
            let rows = clients
                .iter()
                .map(|c| {
                    vec![
                        or_dash(c.cedula.as_deref()),
                        or_dash(c.nombre.as_deref()),
                        or_dash(c.correo.as_deref()),
                    ]
                })
                .collect();
            print_table(&["CEDULA", "NAME", "EMAIL"], rows);
            Ok(())
        }
    }
}
