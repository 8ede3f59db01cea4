use crate::{error::Error, extension::TomlTableExt, state::State};
use std::sync::OnceLock;
use tracing_subscriber::{
    filter::{EnvFilter, LevelFilter},
    layer::SubscriberExt,
};

/// Initializes the global tracing subscriber with the `[tracing]` config of the state.
///
/// The `dev` environment logs with a pretty formatter, while the others log JSON lines.
/// Calling it more than once is a no-op.
pub fn init_tracing(state: &State) -> Result<(), Error> {
    if TRACING_INITIALIZED.get().is_some() {
        tracing::warn!("tracing subscriber has already been initialized");
        return Ok(());
    }

    let in_dev_mode = state.env().is_dev();
    let mut env_filter = if in_dev_mode {
        "info,profile_fields=debug,profile_fields_core=debug"
    } else {
        "warn,profile_fields=info"
    };
    let mut display_target = true;
    let mut display_filename = in_dev_mode;
    let mut display_line_number = in_dev_mode;
    if let Some(config) = state.config().get_table("tracing") {
        if let Some(filter) = config.get_str("filter") {
            env_filter = filter;
        }
        display_target = config.get_bool("display-target").unwrap_or(true);
        display_filename = config.get_bool("display-filename").unwrap_or(in_dev_mode);
        display_line_number = config
            .get_bool("display-line-number")
            .unwrap_or(in_dev_mode);
    }

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(display_target)
        .with_file(display_filename)
        .with_line_number(display_line_number);
    let filter_layer = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(env_filter);
    if in_dev_mode {
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer.pretty());
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::with_source("fail to set the pretty subscriber", err))?;
    } else {
        let subscriber = tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt_layer.json().with_current_span(true));
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|err| Error::with_source("fail to set the JSON subscriber", err))?;
    }
    TRACING_INITIALIZED.set(()).ok();
    Ok(())
}

/// Whether the subscriber has been installed.
static TRACING_INITIALIZED: OnceLock<()> = OnceLock::new();
