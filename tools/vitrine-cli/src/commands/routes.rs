//! List the configured route table.

use anyhow::{Context as _, Result};

use super::RoutesArgs;
use crate::context::Context;
use crate::output::method_badge;

/// Run the routes command.
pub fn run(_args: RoutesArgs, ctx: &Context) -> Result<()> {
    let router = ctx
        .config
        .router(ctx.output.is_verbose())
        .context("Failed to build router")?;
    let routes: Vec<_> = router.routes().collect();

    if ctx.output.is_json() {
        ctx.output.json(&routes);
        return Ok(());
    }

    ctx.output.header(&format!("Routes ({})", ctx.config.app.name));

    let methods: Vec<String> = routes.iter().map(|r| r.methods.join(",")).collect();
    let method_width = methods.iter().map(String::len).max().unwrap_or(0).max(6);
    let pattern_width = routes
        .iter()
        .map(|r| r.pattern.len())
        .max()
        .unwrap_or(0)
        .max(7);

    ctx.output
        .table_row(&["METHODS", "PATTERN", "ACTION"], &[method_width, pattern_width, 0]);
    for (route, methods) in routes.iter().zip(&methods) {
        let badges: Vec<String> = route.methods.iter().map(|m| method_badge(m)).collect();
        // Pad on the plain text; color codes would skew the width.
        let padding = " ".repeat(method_width.saturating_sub(methods.len()));
        ctx.output.table_row(
            &[
                &format!("{}{}", badges.join(","), padding),
                &route.pattern,
                &route.action,
            ],
            &[0, pattern_width, 0],
        );
    }

    Ok(())
}
