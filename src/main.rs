use anyhow::Result;
use clap::Parser;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    event::*,
    event_loop::{ActiveEventLoop, EventLoop},
    keyboard::PhysicalKey,
    window::{Fullscreen, Window, WindowId},
};

use trailhead::cli::Cli;
use trailhead::clock::FrameClock;
use trailhead::input::{self, NavCommand};
use trailhead::nav::{NavigationHistory, PageFlow, SessionHistory};
use trailhead::options::ViewerOptions;
use trailhead::pages::{Page, PageContent};
use trailhead::render::Viewport;
use trailhead::ui::UiFrame;

// === Constants ===

const WINDOW_TITLE: &str = "Battle Ground Lake State Park";

// === Application ===

struct App {
    window: Option<Arc<Window>>,
    viewport: Option<Viewport>,
    flow: PageFlow<SessionHistory>,
    page: Page,
    content: PageContent,
    clock: FrameClock,
    options: ViewerOptions,
    cli: Cli,
    alt_held: bool,
}

impl App {
    fn new(cli: Cli, options: ViewerOptions) -> Self {
        let flow = PageFlow::new(cli.page, SessionHistory::new());
        let page = Page::from_index(flow.index());
        let content = page.content();
        Self {
            window: None,
            viewport: None,
            flow,
            page,
            content,
            clock: FrameClock::new(),
            options,
            cli,
            alt_held: false,
        }
    }

    fn title(&self) -> String {
        format!("{WINDOW_TITLE} - Page {}", self.flow.index())
    }

    fn apply_command(&mut self, command: NavCommand, event_loop: &ActiveEventLoop) {
        match command {
            NavCommand::Advance => self.flow.advance(),
            NavCommand::Retreat => self.flow.retreat(),
            NavCommand::HistoryBack => {
                if !self.flow.navigate_back() {
                    return;
                }
            }
            NavCommand::HistoryForward => {
                if !self.flow.navigate_forward() {
                    return;
                }
            }
            NavCommand::Quit => {
                event_loop.exit();
                return;
            }
        }
        self.refresh_page();
    }

    /// Re-dispatch content off the counter; a no-op while the index maps
    /// to the page already showing.
    fn refresh_page(&mut self) {
        let page = Page::from_index(self.flow.index());
        if page == self.page {
            return;
        }
        self.page = page;
        self.content = page.content();
        log::debug!("showing page {}", page.index());

        if let Some(viewport) = &mut self.viewport {
            viewport.set_page(self.content.scene);
        }
        if let Some(window) = &self.window {
            window.set_title(&self.title());
        }
    }

    fn redraw(&mut self) {
        let dt = self.clock.tick();

        let (Some(viewport), Some(window)) = (&mut self.viewport, &self.window) else {
            return;
        };
        viewport.update(dt);

        let frame = UiFrame {
            page: &self.content,
            page_index: self.flow.index(),
            query: self.flow.history().current().map(|entry| entry.query.as_str()),
            status: viewport.scene_status(),
            fps: self.clock.fps(),
            show_hud: !self.cli.no_ui,
        };

        match viewport.render(window, &frame) {
            Ok(response) => {
                if response.advance {
                    self.flow.advance();
                    self.refresh_page();
                } else if response.retreat {
                    self.flow.retreat();
                    self.refresh_page();
                }
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = viewport.size();
                viewport.resize(size);
            }
            Err(err) => eprintln!("Render error: {}", err),
        }
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_none() {
            let mut attributes = Window::default_attributes()
                .with_title(self.title())
                .with_inner_size(winit::dpi::LogicalSize::new(
                    self.options.window_width,
                    self.options.window_height,
                ));
            if self.options.fullscreen {
                attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
            }

            let window = match event_loop.create_window(attributes) {
                Ok(w) => Arc::new(w),
                Err(e) => {
                    eprintln!("Failed to create window: {}", e);
                    event_loop.exit();
                    return;
                }
            };

            let viewport = match pollster::block_on(Viewport::new(
                window.clone(),
                self.cli.assets.clone(),
                self.options.vsync,
            )) {
                Ok(mut viewport) => {
                    viewport.set_page(self.content.scene);
                    viewport
                }
                Err(e) => {
                    eprintln!("Failed to initialize viewport: {:#}", e);
                    event_loop.exit();
                    return;
                }
            };

            self.window = Some(window);
            self.viewport = Some(viewport);
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        // Let egui handle the event first
        if let (Some(viewport), Some(window)) = (&mut self.viewport, &self.window) {
            if viewport.handle_event(window, &event) {
                return; // egui consumed the event
            }
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::ModifiersChanged(modifiers) => {
                self.alt_held = modifiers.state().alt_key();
            }
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        state: ElementState::Pressed,
                        physical_key: PhysicalKey::Code(code),
                        ..
                    },
                ..
            } => {
                if let Some(command) = input::command_for_key(code, self.alt_held) {
                    self.apply_command(command, event_loop);
                }
            }
            WindowEvent::MouseInput {
                state: ElementState::Pressed,
                button,
                ..
            } => {
                if let Some(command) = input::command_for_mouse(button) {
                    self.apply_command(command, event_loop);
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(viewport) = &mut self.viewport {
                    viewport.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let options = ViewerOptions::load(cli.options.as_deref())?;

    let event_loop = EventLoop::new()?;
    let mut app = App::new(cli, options);

    println!(
        "Battle Ground Lake exhibit - Right/Space next, Left back, Alt+arrows history, Escape to quit"
    );
    event_loop.run_app(&mut app)?;

    Ok(())
}
