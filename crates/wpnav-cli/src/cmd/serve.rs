use anyhow::Context;
use std::path::Path;
use wpnav_server::state::AppState;

pub fn run(root: &Path, port: u16, no_open: bool) -> anyhow::Result<()> {
    let state = AppState::new(root.to_path_buf()).context("failed to load wpnav.yaml")?;
    for w in state.config.validate() {
        tracing::warn!(level = ?w.level, "{}", w.message);
    }

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(async move {
        let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
            .await
            .with_context(|| format!("failed to bind port {port}"))?;
        let actual_port = listener.local_addr()?.port();
        println!("wpnav serving {} on http://localhost:{actual_port}", state.config.backend.api_url);

        tokio::select! {
            res = wpnav_server::serve_on(state, listener, !no_open) => res,
            _ = tokio::signal::ctrl_c() => Ok(()),
        }
    })
}
