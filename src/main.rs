use anyhow::Context;
use hello_triangle::{config::WndConfig, triangle::DrawTriangle, view::SetupStage, wnd::Wnd};
use winit::event_loop::EventLoop;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();
    let event_loop = EventLoop::builder()
        .build()
        .context(SetupStage::EventLoop)?;
    let app = DrawTriangle::new();
    let mut app = Wnd::new(WndConfig::default(), Box::new(app));
    event_loop.run_app(&mut app)?;
    app.finish()
}
