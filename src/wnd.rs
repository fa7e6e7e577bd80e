use winit::{
    application::ApplicationHandler,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow},
    window::WindowId,
};

use crate::{
    config::WndConfig,
    input::{LoopEvent, RunState},
    view::{Draw, View},
};

#[derive(Debug)]
pub struct Wnd {
    config: WndConfig,
    init: Option<Box<dyn Draw>>,
    view: Option<View>,
    state: RunState,
    error: Option<anyhow::Error>,
}
impl Wnd {
    pub fn new(config: WndConfig, draw: Box<dyn Draw>) -> Self {
        Self {
            config,
            init: Some(draw),
            view: None,
            state: RunState::new(),
            error: None,
        }
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// The setup error that ended the loop, if any.
    pub fn finish(self) -> anyhow::Result<()> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    fn fail(&mut self, event_loop: &ActiveEventLoop, e: anyhow::Error) {
        tracing::error!("{e:#}");
        self.state = RunState::Stopped;
        self.error = Some(e);
        event_loop.exit();
    }
}
impl ApplicationHandler for Wnd {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        tracing::info!("resumed");
        event_loop.set_control_flow(ControlFlow::Poll);
        let Some(draw) = self.init.take() else {
            return;
        };
        match View::new(event_loop, &self.config, draw) {
            Ok(view) => self.view = Some(view),
            Err(e) => self.fail(event_loop, e),
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        let event = LoopEvent::from_window_event(&event);
        let prev = self.state;
        self.state = prev.next(&event);
        if prev.is_running() && !self.state.is_running() {
            tracing::info!(?event, "stop requested");
            event_loop.exit();
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if !self.state.is_running() {
            return;
        }
        let Some(view) = self.view.as_mut() else {
            return;
        };
        if let Err(e) = view.draw() {
            tracing::warn!("present failed: {e:#}");
        }
    }

    fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
        self.view = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::triangle::DrawTriangle;

    #[test]
    fn test_new_is_running() {
        let wnd = Wnd::new(WndConfig::default(), Box::new(DrawTriangle::new()));
        assert!(wnd.state().is_running());
        assert!(wnd.finish().is_ok());
    }
}
