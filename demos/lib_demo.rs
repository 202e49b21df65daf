use foxip::{ClientBuilder, IpEnvPlan, Provider, Result};

fn main() -> Result<()> {
    // Build a client from FOX_ADDRESS / FOX_TIMEOUT / FOX_TRACE
    let client = ClientBuilder::new().build()?;
    println!("{}", client.ping()?.message);

    // Find the envs tagged with a group
    for ip_info in client.get_ip_info_group("office")? {
        println!("{}: {}", ip_info.env, ip_info.cidrs.join(", "));
    }

    // Manage an env through the provider lifecycle
    let provider = Provider::from_client(client);
    let plan = IpEnvPlan {
        env: "demo".to_string(),
        groups: vec!["office".to_string()],
        cidrs: vec!["192.0.2.0/24".to_string()],
    };
    let (state, diagnostics) = provider.create_ip_env(&plan)?;
    for diagnostic in diagnostics {
        eprintln!("{diagnostic}");
    }
    println!("{:?}", state);

    let plan = IpEnvPlan {
        cidrs: vec!["192.0.2.0/24".to_string(), "198.51.100.0/24".to_string()],
        ..plan
    };
    let state = provider.update_ip_env(&state, &plan)?;
    println!("{:?}", state);

    provider.delete_ip_env(&state)
}
