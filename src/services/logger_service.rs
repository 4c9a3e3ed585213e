use tracing_subscriber::{EnvFilter, fmt};

pub fn init() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::from_default_env()
        .add_directive("space_viewer=debug".parse()?)
        .add_directive("iced=error".parse()?)
        .add_directive("wgpu_core=error".parse()?)
        .add_directive("wgpu_hal=error".parse()?)
        .add_directive("hyper_util=warn".parse()?)
        .add_directive("reqwest=warn".parse()?);

    fmt().with_env_filter(filter).init();

    Ok(())
}
