#![forbid(unsafe_code)]

//! Elm-style program runtime.
//!
//! The runtime separates state (Model) from rendering (View) and provides
//! a command pattern for the effects it owns: quitting, follow-up
//! messages, and one-shot animation ticks. A tick behaves like an
//! animation-frame request: the model asks for one, receives the elapsed
//! time when it fires, and must ask again to keep an animation running.
//!
//! # Example
//!
//! ```ignore
//! use vgrid_runtime::{Cmd, Model, Program, ProgramConfig};
//! use vgrid_core::event::Event;
//! use vgrid_render::Frame;
//!
//! struct Counter {
//!     count: i32,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Quit,
//!     Noop,
//! }
//!
//! impl From<Event> for Msg {
//!     fn from(event: Event) -> Self {
//!         match event {
//!             Event::Key(k) if k.is_char('q') => Msg::Quit,
//!             Event::Key(k) if k.is_char('+') => Msg::Increment,
//!             _ => Msg::Noop,
//!         }
//!     }
//! }
//!
//! impl Model for Counter {
//!     type Message = Msg;
//!
//!     fn update(&mut self, msg: Msg) -> Cmd<Msg> {
//!         match msg {
//!             Msg::Increment => { self.count += 1; Cmd::none() }
//!             Msg::Quit => Cmd::quit(),
//!             Msg::Noop => Cmd::none(),
//!         }
//!     }
//!
//!     fn view(&self, frame: &mut Frame) {
//!         // Render counter value to frame
//!     }
//! }
//! ```

use std::io;
use std::time::{Duration, Instant};

use vgrid_core::event::{Event, MouseEvent};
use vgrid_render::{Frame, HitData, HitId, HitRegion};

use crate::presenter::Presenter;
use crate::session::{SessionOptions, TerminalSession};

#[cfg(feature = "tracing")]
use tracing::debug;

/// The Model trait defines application state and behavior.
pub trait Model: Sized {
    /// The message type for this model.
    ///
    /// Messages represent actions that update the model state.
    /// Must be convertible from terminal events.
    type Message: From<Event>;

    /// Initialize the model with startup commands.
    fn init(&mut self) -> Cmd<Self::Message> {
        Cmd::none()
    }

    /// Update the model in response to a message.
    ///
    /// This is the core state transition function. Returns commands
    /// for any effects that should be executed.
    fn update(&mut self, msg: Self::Message) -> Cmd<Self::Message>;

    /// Render the current state to a frame.
    fn view(&self, frame: &mut Frame);

    /// Route a mouse event, given the hit-test result from the last
    /// rendered frame at the event position.
    ///
    /// The default falls back to the plain event conversion.
    fn on_mouse(
        &mut self,
        event: MouseEvent,
        hit: Option<(HitId, HitRegion, HitData)>,
    ) -> Cmd<Self::Message> {
        let _ = hit;
        self.update(Self::Message::from(Event::Mouse(event)))
    }

    /// Handle an animation tick requested via [`Cmd::tick`].
    ///
    /// `dt` is the time elapsed since the tick was requested. Return
    /// another tick command to continue the animation.
    fn tick(&mut self, dt: Duration) -> Cmd<Self::Message> {
        let _ = dt;
        Cmd::none()
    }
}

/// Commands represent effects to be executed by the runtime.
#[derive(Debug, Default)]
pub enum Cmd<M> {
    /// No operation.
    #[default]
    None,
    /// Quit the application.
    Quit,
    /// Send a message to the model.
    Msg(M),
    /// Execute multiple commands in order.
    Batch(Vec<Cmd<M>>),
    /// Request a one-shot animation tick after a duration.
    Tick(Duration),
}

impl<M> Cmd<M> {
    /// Create a no-op command.
    #[must_use]
    pub fn none() -> Self {
        Self::None
    }

    /// Create a quit command.
    #[must_use]
    pub fn quit() -> Self {
        Self::Quit
    }

    /// Create a message command.
    #[must_use]
    pub fn msg(msg: M) -> Self {
        Self::Msg(msg)
    }

    /// Create a batch of commands.
    #[must_use]
    pub fn batch(cmds: Vec<Cmd<M>>) -> Self {
        Self::Batch(cmds)
    }

    /// Create a tick command.
    #[must_use]
    pub fn tick(duration: Duration) -> Self {
        Self::Tick(duration)
    }
}

/// Runtime configuration.
#[derive(Debug, Clone, Copy)]
pub struct ProgramConfig {
    /// Switch to the alternate screen.
    pub alt_screen: bool,
    /// Capture mouse events.
    pub mouse: bool,
    /// Poll timeout when no tick is scheduled.
    pub poll_timeout: Duration,
}

impl Default for ProgramConfig {
    fn default() -> Self {
        Self {
            alt_screen: true,
            mouse: true,
            poll_timeout: Duration::from_millis(250),
        }
    }
}

/// A pending one-shot tick.
#[derive(Debug, Clone, Copy)]
struct PendingTick {
    requested: Instant,
    due: Instant,
}

/// The program runtime: owns the terminal session and drives the
/// update/view loop.
pub struct Program<M: Model> {
    model: M,
    session: TerminalSession,
    presenter: Presenter,
    frame: Frame,
    poll_timeout: Duration,
    running: bool,
    dirty: bool,
    pending_tick: Option<PendingTick>,
}

impl<M: Model> Program<M> {
    /// Create a program with default configuration.
    pub fn new(model: M) -> io::Result<Self> {
        Self::with_config(model, ProgramConfig::default())
    }

    /// Create a program, entering the terminal session immediately.
    pub fn with_config(model: M, config: ProgramConfig) -> io::Result<Self> {
        let session = TerminalSession::enter(SessionOptions {
            alt_screen: config.alt_screen,
            mouse: config.mouse,
        })?;
        let (width, height) = TerminalSession::size()?;
        Ok(Self {
            model,
            session,
            presenter: Presenter::new(),
            frame: Frame::new(width.max(1), height.max(1)),
            poll_timeout: config.poll_timeout,
            running: true,
            dirty: false,
            pending_tick: None,
        })
    }

    /// Run the update/view loop until the model quits.
    pub fn run(mut self) -> io::Result<()> {
        let cmd = self.model.init();
        self.execute_cmd(cmd);

        self.render()?;

        while self.running {
            let timeout = match self.pending_tick {
                Some(tick) => tick.due.saturating_duration_since(Instant::now()),
                None => self.poll_timeout,
            };

            if self.session.poll(timeout)? {
                // Drain everything pending so rapid events coalesce into
                // one render.
                loop {
                    if let Some(event) = self.session.read()? {
                        self.handle_event(event);
                    }
                    if !self.session.poll(Duration::ZERO)? {
                        break;
                    }
                }
            }

            if let Some(tick) = self.pending_tick
                && Instant::now() >= tick.due
            {
                self.pending_tick = None;
                let cmd = self.model.tick(tick.requested.elapsed());
                self.dirty = true;
                self.execute_cmd(cmd);
            }

            if self.dirty && self.running {
                self.render()?;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Resize { width, height } => {
                #[cfg(feature = "tracing")]
                debug!(width, height, "terminal resized");
                self.frame.resize(width.max(1), height.max(1));
                self.presenter.invalidate();
                let cmd = self.model.update(M::Message::from(event));
                self.dirty = true;
                self.execute_cmd(cmd);
            }
            Event::Mouse(mouse) => {
                let hit = self.frame.hit_test(mouse.x, mouse.y);
                let cmd = self.model.on_mouse(mouse, hit);
                self.dirty = true;
                self.execute_cmd(cmd);
            }
            _ => {
                let cmd = self.model.update(M::Message::from(event));
                self.dirty = true;
                self.execute_cmd(cmd);
            }
        }
    }

    fn execute_cmd(&mut self, cmd: Cmd<M::Message>) {
        match cmd {
            Cmd::None => {}
            Cmd::Quit => self.running = false,
            Cmd::Msg(m) => {
                let cmd = self.model.update(m);
                self.dirty = true;
                self.execute_cmd(cmd);
            }
            Cmd::Batch(cmds) => {
                for c in cmds {
                    self.execute_cmd(c);
                }
            }
            Cmd::Tick(duration) => {
                // One tick in flight at a time; a re-request while one is
                // pending just replaces the deadline.
                let now = Instant::now();
                self.pending_tick = Some(PendingTick {
                    requested: now,
                    due: now + duration,
                });
            }
        }
    }

    fn render(&mut self) -> io::Result<()> {
        self.frame.clear();
        self.model.view(&mut self.frame);
        self.presenter
            .present(self.session.writer(), &self.frame.buffer)?;
        self.dirty = false;
        Ok(())
    }
}
