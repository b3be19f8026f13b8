use crate::input::{collect_nonblocking, Action};
use crate::screen::Screen;
use ripple::{Command, Session, SimConfig};
use std::time::{Duration, Instant};
use tracing::info;

pub(crate) struct App {
    session: Session,
    screen: Screen,
    fps_cap: u32,
    started: Instant,
    /// Grid cell under the held primary button.
    held: Option<(i64, i64)>,
    should_quit: bool,
}

impl App {
    fn init(cfg: SimConfig, fps_cap: u32) -> anyhow::Result<Self> {
        let screen = Screen::begin()?;
        let (w, h) = screen.grid_size();
        let session = Session::new(cfg.with_size(w, h))?;
        Ok(Self {
            session,
            screen,
            fps_cap: fps_cap.clamp(10, 240),
            started: Instant::now(),
            held: None,
            should_quit: false,
        })
    }

    fn now_ms(&self) -> u64 {
        self.started.elapsed().as_millis() as u64
    }

    /// A new grid size means a new session; the mode flags carry over.
    fn restart_session(&mut self) -> anyhow::Result<()> {
        let (w, h) = self.screen.grid_size();
        let mut cfg = self.session.config().clone().with_size(w, h);
        cfg.interference = self.session.interference();
        cfg.auto_ripples = self.session.auto_ripples();
        self.session = Session::new(cfg)?;
        self.held = None;
        info!(w, h, "terminal resized, session restarted");
        Ok(())
    }

    fn handle(&mut self, action: Action) {
        let click = self.session.config().click_force;
        match action {
            Action::Quit => self.should_quit = true,
            Action::Sim(cmd) => self.session.apply(cmd),
            Action::Press { col, row } => {
                self.held = self.screen.to_grid(col, row);
                if let Some((x, y)) = self.held {
                    self.session.apply(Command::Poke { x, y, force: click });
                }
            }
            Action::Drag { col, row } => {
                if let Some(p) = self.screen.to_grid(col, row) {
                    self.held = Some(p);
                }
            }
            Action::Release => self.held = None,
        }
    }

    fn run(&mut self) -> anyhow::Result<()> {
        let frame_dt = Duration::from_secs_f32(1.0 / self.fps_cap as f32);

        let mut fps_timer = Instant::now();
        let mut frames: u32 = 0;
        let mut fps: f32 = 0.0;

        while !self.should_quit {
            let frame_start = Instant::now();

            if self.screen.resize_if_needed()? {
                self.restart_session()?;
            }

            for action in collect_nonblocking()? {
                self.handle(action);
                if self.should_quit {
                    return Ok(());
                }
            }
            if let Some((x, y)) = self.held {
                let force = self.session.config().hold_force;
                self.session.apply(Command::Poke { x, y, force });
            }

            let now = self.now_ms();
            self.session.advance_frame(now);

            let frame = self.session.frame_image();
            self.screen.draw_frame(frame);
            let stats = self.session.stats();
            let hud = format!(
                "ripple  mode:{}  auto:{}  fps:{:>5.1}  energy:{:>9.3}  [r]eset [j]ostle [i]nterference [a]uto [q]uit",
                if self.session.interference() { "interference" } else { "signed" },
                if self.session.auto_ripples() { "on " } else { "off" },
                fps,
                stats.energy,
            );
            self.screen.draw_hud(&hud);
            self.screen.present()?;

            frames += 1;
            if fps_timer.elapsed() >= Duration::from_millis(500) {
                fps = frames as f32 / fps_timer.elapsed().as_secs_f32();
                fps_timer = Instant::now();
                frames = 0;
            }

            spin_sleep(frame_dt, frame_start);
        }
        Ok(())
    }
}

pub(crate) fn run(cfg: SimConfig, fps_cap: u32) -> anyhow::Result<()> {
    let mut app = App::init(cfg, fps_cap)?;
    app.run()?;
    info!(frames = app.session.frames(), "ripple finished");
    Ok(())
}

fn spin_sleep(target: Duration, start: Instant) {
    let end = start + target;
    loop {
        let t = Instant::now();
        if t >= end {
            break;
        }
        let left = end - t;
        if left > Duration::from_millis(2) {
            std::thread::sleep(Duration::from_millis(1));
        } else {
            std::hint::spin_loop();
        }
    }
}
