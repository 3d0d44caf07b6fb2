use chrono::Local;
use smithay_client_toolkit::{
    reexports::calloop::{
        LoopHandle, RegistrationToken,
        timer::{TimeoutAction, Timer},
    },
    shell::WaylandSurface,
};
use std::time::{Duration, Instant};
use wayland_client::{QueueHandle, protocol::wl_shm::Format::Argb8888};

use super::{
    canvas::Canvas,
    clock::{Clock, ClockState},
    config::Config,
    theme::Theme,
    time_state::TimeState,
    wayland::Wayland,
};

pub struct AnalogClock {
    pub wl: Wayland,
    pub clock: Clock,
    canvas: Canvas,
    config: Config,
    loop_handle: LoopHandle<'static, AnalogClock>,
    timer: Option<RegistrationToken>,
    /// Held while the surface is gone
    saved: Option<ClockState>,
    configured: bool,
}

impl AnalogClock {
    pub fn new(wl: Wayland, config: Config, loop_handle: LoopHandle<'static, Self>) -> Self {
        let clock = Clock::new(TimeState::from_date_str(config.date.as_deref()));
        log::info!(
            "Starting at {} elapsed seconds",
            clock.save_state().elapsed_seconds
        );

        Self {
            wl,
            clock,
            canvas: Canvas::new(0, 0, Theme::default()),
            config,
            loop_handle,
            timer: None,
            saved: None,
            configured: false,
        }
    }

    pub fn is_shown(&self) -> bool {
        self.wl.layer.is_some()
    }

    /// Creates the surface, restoring the time saved by the last [`Self::hide`].
    pub fn show(&mut self, qh: &QueueHandle<Self>) -> anyhow::Result<()> {
        if self.is_shown() {
            return Ok(());
        }

        if let Some(state) = self.saved.take() {
            log::info!("Restoring clock at {} elapsed seconds", state.elapsed_seconds);
            self.clock.restore_state(state);
        }

        self.wl.create_clock_surface(qh, self.config.side);
        self.start_timer()
    }

    /// Tears the surface down; the timer goes first so it never sees a dead surface.
    pub fn hide(&mut self) {
        self.stop_timer();
        if self.is_shown() {
            self.saved = Some(self.clock.save_state());
        }
        if self.wl.destroy_clock_surface() {
            log::info!("Clock hidden");
        }
        self.configured = false;
    }

    pub fn on_configure(&mut self, width: u32, height: u32) {
        // Zero means the compositor leaves the size up to us
        let width = if width == 0 { self.config.side } else { width };
        let height = if height == 0 { self.config.side } else { height };

        self.canvas.resize(width, height);
        self.clock.on_resize(width, height, self.config.padding);
        self.configured = true;
    }

    pub fn draw(&mut self) -> anyhow::Result<()> {
        if !self.configured || !self.clock.take_redraw() {
            return Ok(());
        }

        self.clock.render(&mut self.canvas);
        self.update_surface()
    }

    fn on_timer(&mut self) -> TimeoutAction {
        if !self.is_shown() {
            self.timer = None;
            return TimeoutAction::Drop;
        }

        self.clock.on_tick();
        TimeoutAction::ToDuration(next_tick())
    }

    fn start_timer(&mut self) -> anyhow::Result<()> {
        self.stop_timer();

        let timer = Timer::from_duration(next_tick());
        let token = self
            .loop_handle
            .insert_source(timer, |_: Instant, _: &mut (), app: &mut AnalogClock| {
                app.on_timer()
            })
            .map_err(|e| e.error)?;
        self.timer = Some(token);

        Ok(())
    }

    fn stop_timer(&mut self) {
        if let Some(token) = self.timer.take() {
            self.loop_handle.remove(token);
        }
    }

    fn update_surface(&mut self) -> anyhow::Result<()> {
        let Some(layer) = &self.wl.layer else {
            return Ok(());
        };
        let (width, height) = (self.canvas.width as i32, self.canvas.height as i32);
        if width == 0 || height == 0 {
            return Ok(());
        }

        let (buffer, surface) = self
            .wl
            .pool
            .create_buffer(width, height, self.canvas.stride(), Argb8888)?;

        surface.copy_from_slice(self.canvas.get_data());

        let wl_surface = layer.wl_surface();
        wl_surface.damage_buffer(0, 0, width, height);
        buffer.attach_to(wl_surface)?;
        layer.commit();

        Ok(())
    }
}

fn next_tick() -> Duration {
    let ms_since_last_sec = Local::now().timestamp_subsec_millis().min(999);
    Duration::from_millis((1000 - ms_since_last_sec) as u64)
}
