//! Dispatch a request through the configured router.

use std::io::Write;

use anyhow::{Context as _, Result};
use vitrine_core::{Method, RequestContext};
use vitrine_sink::WriterSink;

use super::RequestArgs;
use crate::context::Context;

/// Run the request command.
pub fn run(args: RequestArgs, ctx: &Context) -> Result<()> {
    let stdout = std::io::stdout();
    let emitted = execute(&args, ctx, stdout.lock())?;

    ctx.output.debug(&format!("Emitted {} payload(s)", emitted));

    Ok(())
}

/// Dispatch the request and write each emitted payload to `out`.
///
/// Returns the number of payloads written.
pub fn execute<W: Write>(args: &RequestArgs, ctx: &Context, out: W) -> Result<usize> {
    let (method, target) = args.target();
    let method =
        Method::parse(method).with_context(|| format!("Unsupported method: {}", method))?;

    ctx.config.validate()?;
    let router = ctx
        .config
        .router(ctx.output.is_verbose())
        .context("Failed to build router")?;

    let mut request = RequestContext::from_uri(method, target);
    ctx.output
        .debug(&format!("{} {} [{}]", method, request.path, request.request_id));

    let mut sink = WriterSink::new(out).pretty(args.pretty);
    router
        .dispatch(&mut request, &mut sink)
        .with_context(|| format!("{} {} failed", method, target))?;

    Ok(sink.emitted())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;
    use crate::config::VitrineConfig;
    use crate::output::Output;
    use vitrine_catalog::{Product, DEFAULT_PRODUCT};

    fn context(config: VitrineConfig) -> Context {
        Context {
            config,
            config_path: None,
            output: Output::new(false, true),
            cwd: PathBuf::from("/nonexistent/vitrine"),
        }
    }

    fn args(first: &str, path: Option<&str>, pretty: bool) -> RequestArgs {
        RequestArgs {
            first: first.to_string(),
            path: path.map(String::from),
            pretty,
        }
    }

    #[test]
    fn test_get_products_writes_one_line() {
        let mut out = Vec::new();

        let emitted = execute(
            &args("/products", None, false),
            &context(VitrineConfig::default()),
            &mut out,
        )
        .expect("route exists");

        assert_eq!(emitted, 1);
        let text = String::from_utf8(out).expect("utf-8 output");
        assert_eq!(text.lines().count(), 1);
        let products: Vec<Product> = serde_json::from_str(&text).expect("json line");
        assert_eq!(products, vec![DEFAULT_PRODUCT]);
    }

    #[test]
    fn test_pretty_output_uses_configured_catalog() {
        let config = VitrineConfig {
            catalog: Some(vec![Product::new("Mug", "Ceramic mug", 12)]),
            ..VitrineConfig::default()
        };
        let mut out = Vec::new();

        execute(
            &args("GET", Some("/products?page=2"), true),
            &context(config),
            &mut out,
        )
        .expect("route exists");

        let products: Vec<Product> = serde_json::from_slice(&out).expect("json output");
        assert_eq!(products, vec![Product::new("Mug", "Ceramic mug", 12)]);
    }

    #[test]
    fn test_unsupported_method_is_rejected() {
        let mut out = Vec::new();

        let err = execute(
            &args("FETCH", Some("/products"), false),
            &context(VitrineConfig::default()),
            &mut out,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "Unsupported method: FETCH");
        assert!(out.is_empty());
    }

    #[test]
    fn test_unknown_path_is_an_error() {
        let mut out = Vec::new();

        let err = execute(
            &args("/orders", None, false),
            &context(VitrineConfig::default()),
            &mut out,
        )
        .unwrap_err();

        assert_eq!(err.to_string(), "GET /orders failed");
        assert_eq!(
            format!("{:#}", err),
            "GET /orders failed: No route for GET /orders"
        );
        assert!(out.is_empty());
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = VitrineConfig {
            catalog: Some(Vec::new()),
            ..VitrineConfig::default()
        };

        let result = execute(&args("/products", None, false), &context(config), Vec::new());

        assert!(result.is_err());
    }
}
