mod config;
mod drivers;
mod middleware;
mod registry;

use anyhow::{Context, Result};
use config::{BotConfig, OutputFormat};
use middleware::{TraceMiddleware, TrimMiddleware};
use parley_shared::{codec::FrameEncoder, AttributeValue, Callback, CommandMapping, GroupAttributes};
use registry::CommandRegistry;
use tokio::io::AsyncWriteExt;

use tracing::{debug, error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the snapshots
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config = match BotConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {:#}", e);
            return Err(e);
        }
    };

    info!("Parley starting: {}", config.bot_name);
    info!("  Drivers: {}", config.drivers.join(", "));
    info!("  Output: {}", config.output);

    let active = drivers::instantiate(&config);
    debug!("{} built-in driver(s) active", active.len());

    let mut registry = CommandRegistry::new();
    register_commands(&mut registry, &config);
    if registry.is_empty() {
        warn!("No commands registered");
    }
    info!("Registered {} commands", registry.len());
    for command in registry.commands() {
        debug!("  {:?}", command);
    }

    let snapshots = registry.snapshots();
    let output = render(&snapshots, config.output).context("failed to encode snapshots")?;

    let mut stdout = tokio::io::stdout();
    stdout.write_all(&output).await?;
    stdout.flush().await?;

    Ok(())
}

/// The commands every parley bot answers to
fn register_commands(registry: &mut CommandRegistry, config: &BotConfig) {
    let bot_name = config.bot_name.clone();
    registry.hears(
        "hello",
        Callback::handler(move |message, _| {
            info!("[{}] Greeting {}", bot_name, message.sender);
            Ok(())
        }),
    );
    registry.hears("help", "Support@help").mark_skips_conversation();

    let mut attributes = GroupAttributes::new()
        .driver(drivers::from_config(config))
        .middleware(vec![
            AttributeValue::middleware(TrimMiddleware),
            AttributeValue::middleware(TraceMiddleware::default()),
        ]);
    if let Some(recipient) = &config.recipient {
        attributes = attributes.recipient(recipient.clone());
    }

    registry.group(attributes, |r| {
        r.hears("weather in {city}", "Weather@forecast");
        r.hears("remind me to {task}", "Reminders@create");
        r.hears("stop", "Conversation@stop").mark_stops_conversation();
        r.hears("status", "Health@status").mark_skips_conversation();
    });
}

/// Serialize snapshots in the configured output format
fn render(snapshots: &[CommandMapping], format: OutputFormat) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Json => {
            let mut out = Vec::new();
            for mapping in snapshots {
                serde_json::to_writer(&mut out, mapping)?;
                out.push(b'\n');
            }
            Ok(out)
        }
        OutputFormat::Framed => {
            let mut encoder = FrameEncoder::new();
            for mapping in snapshots {
                encoder.encode(mapping)?;
            }
            Ok(encoder.take().to_vec())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parley_shared::codec::FrameDecoder;
    use parley_shared::{CallbackRecord, DriverFilter};

    fn registry_for(config: &BotConfig) -> CommandRegistry {
        let mut registry = CommandRegistry::new();
        register_commands(&mut registry, config);
        registry
    }

    #[test]
    fn test_default_commands() {
        let registry = registry_for(&BotConfig::default());
        assert_eq!(registry.len(), 6);

        let commands = registry.commands();
        assert!(commands[0].callback().is_handler());
        assert!(commands[0].driver_filter().is_none());
        assert!(commands[1].should_skip_conversation());

        let weather = &commands[2];
        assert_eq!(
            weather.driver_filter(),
            Some(&DriverFilter::Any(vec!["Console".into(), "Web".into()]))
        );
        assert_eq!(weather.middleware().len(), 2);
        assert!(weather.recipient().is_none());
        assert!(commands[4].should_stop_conversation());
    }

    #[test]
    fn test_configured_recipient_applies_to_group() {
        let config = BotConfig {
            recipient: Some("ops".into()),
            ..Default::default()
        };
        let registry = registry_for(&config);

        assert!(registry.commands()[0].recipient().is_none());
        assert!(registry.commands()[2..].iter().all(|c| c.recipient() == Some("ops")));
    }

    #[test]
    fn test_render_json_lines() {
        let registry = registry_for(&BotConfig::default());
        let out = render(&registry.snapshots(), OutputFormat::Json).unwrap();
        let text = String::from_utf8(out).unwrap();

        let lines: Vec<serde_json::Value> = text
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0]["callback"], "handler");
        assert_eq!(lines[2]["middleware"], serde_json::json!(["trim", "trace"]));
        assert!(lines.iter().all(|l| l.as_object().unwrap().len() == 5));
    }

    #[test]
    fn test_render_framed() {
        let registry = registry_for(&BotConfig::default());
        let out = render(&registry.snapshots(), OutputFormat::Framed).unwrap();

        let mut decoder = FrameDecoder::new();
        decoder.extend(&out);
        let mut records = Vec::new();
        while let Some(record) = decoder.decode_next().unwrap() {
            records.push(record);
        }

        assert_eq!(records.len(), 6);
        assert_eq!(records[1].callback, CallbackRecord::Named("Support@help".into()));
        assert_eq!(records[3].pattern, "remind me to {task}");
    }
}
