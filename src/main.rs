use embedhttp::registry::{HandlerRegistry, ParamSpec};
use embedhttp::{logger, Config, Server};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cfg = Config::load()?;

    // Size the runtime from the workers setting, CPU core count otherwise
    let mut runtime_builder = tokio::runtime::Builder::new_multi_thread();
    runtime_builder.enable_all();
    if let Some(workers) = cfg.server.workers {
        runtime_builder.worker_threads(workers);
    }
    let runtime = runtime_builder.build()?;

    runtime.block_on(async_main(cfg))
}

async fn async_main(cfg: Config) -> Result<(), Box<dyn std::error::Error>> {
    logger::init(&cfg)?;

    let registry = build_registry()?;
    let mut routes: Vec<String> = registry.names().map(String::from).collect();
    routes.sort_unstable();

    let server = Server::bind(cfg.clone(), registry)?;
    let addr = server.local_addr();
    logger::log_server_start(&addr, &cfg, &routes);

    let handle = server.spawn();

    tokio::signal::ctrl_c().await?;
    handle.stop().await;
    Ok(())
}

/// Sample handlers demonstrating the dispatch surface
fn build_registry() -> Result<HandlerRegistry, embedhttp::RegistryError> {
    let mut registry = HandlerRegistry::new();

    // /add?a=2&b=3 -> {"sum":5}
    registry.register(
        "add",
        vec![ParamSpec::integer("a"), ParamSpec::integer("b")],
        |args| Ok(json!({ "sum": args.integer("a")? + args.integer("b")? })),
    )?;

    // /greet?name=ada -> {"greeting":"Hello, ada!"}; name defaults to "world"
    registry.register("greet", vec![ParamSpec::text("name")], |args| {
        let name = args.text_or("name", "world")?;
        Ok(json!({ "greeting": format!("Hello, {name}!") }))
    })?;

    // /ping -> {"msg":"Success"}
    registry.register("ping", Vec::new(), |_| Ok(json!(null)))?;

    Ok(registry)
}
