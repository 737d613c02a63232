use std::path::Path;
use std::time::Duration;

use anyhow::{bail, Context};
use planner_app::platform::logging;
use planner_app::{Controller, ControllerConfig, HeadlessPage, CONFIG_FILENAME};
use planner_logging::planner_warn;

fn main() -> anyhow::Result<()> {
    let loaded = ControllerConfig::load(Path::new(CONFIG_FILENAME));
    let config = loaded.as_ref().cloned().unwrap_or_default();
    logging::initialize(config.log_destination);
    if let Err(err) = &loaded {
        planner_warn!("using default configuration: {err}");
    }

    let mut controller = Controller::new(
        HeadlessPage::new(),
        &config.backend_url,
        config.fetch_settings(),
    )
    .with_context(|| format!("starting plan engine for {}", config.backend_url))?;

    controller.bootstrap(&config.initial_location);
    if !controller.wait_until_idle(config.request_timeout() + Duration::from_secs(1)) {
        bail!("plan request did not settle");
    }

    let page = controller.surface();
    if let Some(failure) = page.last_failure() {
        bail!("plan request failed: {failure}");
    }
    println!("{}", page.location().unwrap_or("/"));
    println!("{}", page.plan_markup());
    Ok(())
}
