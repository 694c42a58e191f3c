mod background;
mod config;
mod core;
mod domain;
mod error;
mod render;
mod route;
mod session;
mod widget;

use anyhow::Context;

use crate::background::FloorplanImage;
use crate::config::FloorviewConfig;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = FloorviewConfig::load();
    let params = config
        .affine_params()
        .inspect_err(|err| log::error!("Invalid affine configuration: {}", err))
        .context("invalid affine configuration")?;
    let background = FloorplanImage::load(&config.floorplan_path);

    core::app::run(core::app::AppFlags {
        config,
        params,
        background,
    })?;
    Ok(())
}
