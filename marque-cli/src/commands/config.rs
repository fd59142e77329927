use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use marque_lib::Settings;
use marque_suggest::{ConfigSource, config_sources, credentials};

fn mask_value(s: &str) -> String {
    match s.char_indices().nth(4) {
        Some((idx, _)) => format!("{}****", &s[..idx]),
        None => "****".to_string(),
    }
}

/// Show settings and where each provider value comes from.
pub(crate) fn run_config_show(settings: &Settings, data_override: Option<PathBuf>) {
    let path = marque_lib::settings_path();

    log::info!(
        "{}",
        "marque configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();

    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found, using defaults)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }

    match settings.resolve_data_file(data_override) {
        Ok(p) => log::info!(
            "  Catalog file:  {}",
            p.display().if_supports_color(Stdout, |t| t.cyan())
        ),
        Err(e) => log::info!(
            "  Catalog file:  {}",
            e.to_string().if_supports_color(Stdout, |t| t.red())
        ),
    }
    log::info!("  Page size:     {}", settings.page_size());
    crate::log_blank();

    log::info!("{}", "Provider".if_supports_color(Stdout, |t| t.bold()));
    let sources = config_sources(settings);
    let provider = &settings.provider;

    let get_value = |source: &ConfigSource, from_file: Option<&String>, default: &str| {
        match source {
            ConfigSource::EnvVar(var) => std::env::var(var).ok(),
            ConfigSource::ConfigFile => from_file.cloned(),
            ConfigSource::Default => Some(default.to_string()),
            ConfigSource::Missing => None,
        }
    };

    let endpoint = get_value(
        &sources.endpoint,
        provider.endpoint.as_ref(),
        credentials::DEFAULT_ENDPOINT,
    );
    let model = get_value(&sources.model, provider.model.as_ref(), credentials::DEFAULT_MODEL);
    let api_key =
        get_value(&sources.api_key, provider.api_key.as_ref(), "").map(|k| mask_value(&k));

    let fields: [(&str, &ConfigSource, Option<String>); 3] = [
        ("endpoint", &sources.endpoint, endpoint),
        ("model", &sources.model, model),
        ("api_key", &sources.api_key, api_key),
    ];

    for (name, source, value) in fields {
        let source_str = format!("({})", source);
        match value {
            Some(v) => log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                v,
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
            None => log::info!(
                "  {} {} {}",
                format!("{}:", name).if_supports_color(Stdout, |t| t.cyan()),
                "not set".if_supports_color(Stdout, |t| t.yellow()),
                source_str.if_supports_color(Stdout, |t| t.dimmed()),
            ),
        }
    }

    let timeout = settings
        .provider
        .timeout_secs
        .unwrap_or(credentials::DEFAULT_TIMEOUT.as_secs());
    log::info!(
        "  {} {}s",
        "timeout:".if_supports_color(Stdout, |t| t.cyan()),
        timeout
    );
}

/// Print the settings file path.
pub(crate) fn run_config_path() {
    log::info!("{}", marque_lib::settings_path().display());
}
