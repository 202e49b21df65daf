use crate::cli::{self, Command, OutputFormat};
use foxip::{Client, ClientBuilder, IpEnvPlan, IpEnvState, Provider, Result};

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build the API client from CLI arguments and environment variables
--------------------------------------------------------------------------------------*/

pub fn build_client(args: &cli::Args) -> Result<Client> {
    let mut builder = ClientBuilder::new();
    if let Some(address) = &args.address {
        builder.address(address);
    }
    if let Some(timeout) = args.timeout {
        builder.timeout(timeout);
    }
    if args.trace {
        builder.trace(true);
    }
    builder.build()
}

/*--------------------------------------------------------------------------------------
  Run the selected command
--------------------------------------------------------------------------------------*/

pub fn run(args: &cli::Args) -> Result<()> {
    let provider = Provider::from_client(build_client(args)?);

    match &args.command {
        Command::Ping => {
            let ping = provider.read_ping()?;
            cli::output::ping(&ping, args.output)?;
        }

        Command::Env { id } => {
            let state = provider.read_ip_env(id)?;
            records(args, &[state])?;
        }

        Command::Group { group } => {
            let state = provider.read_ip_group(group)?;
            cli::log::group(&state);
            records(args, &state.ip_infos)?;
        }

        Command::All => {
            let state = provider.read_ip_all()?;
            cli::log::all(&state);
            records(args, &state.ip_infos)?;
        }

        Command::Create { env, groups, cidrs } => {
            let plan = IpEnvPlan {
                env: env.clone(),
                groups: groups.clone(),
                cidrs: cidrs.clone(),
            };
            let (state, diagnostics) = provider.create_ip_env(&plan)?;
            for diagnostic in &diagnostics {
                eprintln!("{diagnostic}");
            }
            records(args, &[state])?;
        }

        Command::Update { env, groups, cidrs } => {
            let prior = provider.read_ip_env(env)?;
            let plan = IpEnvPlan {
                env: env.clone(),
                groups: groups.clone().unwrap_or_else(|| prior.groups.clone()),
                cidrs: cidrs.clone().unwrap_or_else(|| prior.cidrs.clone()),
            };
            let state = provider.update_ip_env(&prior, &plan)?;
            records(args, &[state])?;
        }

        Command::Delete { env } => {
            let state = IpEnvState {
                id: env.clone(),
                env: env.clone(),
                ..IpEnvState::default()
            };
            provider.delete_ip_env(&state)?;
            println!("Deleted env {env}");
        }
    }

    Ok(())
}

/*--------------------------------------------------------------------------------------
  Print (and optionally save) env records
--------------------------------------------------------------------------------------*/

fn records(args: &cli::Args, states: &[IpEnvState]) -> Result<()> {
    match args.output {
        OutputFormat::Table => cli::output::env_table(states),
        OutputFormat::Json => cli::output::json(states)?,
        OutputFormat::Cidr => cli::output::cidrs_in_cidr_format(states),
        OutputFormat::Netmask => cli::output::cidrs_in_netmask_format(states),
    }

    if let Some(path) = &args.csv_file {
        cli::csv::save(states, path)?;
    }

    Ok(())
}
