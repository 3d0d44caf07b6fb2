use smithay_client_toolkit::{
    compositor::CompositorState,
    output::OutputState,
    registry::RegistryState,
    seat::SeatState,
    shell::{
        WaylandSurface,
        wlr_layer::{KeyboardInteractivity, Layer, LayerShell, LayerSurface},
    },
    shm::{Shm, slot::SlotPool},
};
use wayland_client::{QueueHandle, globals::GlobalList, protocol::wl_keyboard::WlKeyboard};

use crate::AnalogClock;

const NAMESPACE: &str = "analog-clock";

pub struct Wayland {
    pub registry_state: RegistryState,
    pub seat_state: SeatState,
    pub output_state: OutputState,
    pub pool: SlotPool,
    pub shm: Shm,
    pub compositor: CompositorState,
    pub layer_shell: LayerShell,
    pub layer: Option<LayerSurface>,
    pub keyboard: Option<WlKeyboard>,
    pub exit: bool,
}

impl Wayland {
    pub fn new(
        globals: &GlobalList,
        qh: &QueueHandle<AnalogClock>,
        side: u32,
    ) -> anyhow::Result<Self> {
        let shm = Shm::bind(globals, qh)?;

        Ok(Self {
            registry_state: RegistryState::new(globals),
            seat_state: SeatState::new(globals, qh),
            output_state: OutputState::new(globals, qh),
            pool: SlotPool::new(pool_len(side)?, &shm)?,
            shm,
            compositor: CompositorState::bind(globals, qh)?,
            layer_shell: LayerShell::bind(globals, qh)?,
            layer: None,
            keyboard: None,
            exit: false,
        })
    }

    /// Drops the clock surface. Returns whether there was one.
    pub fn destroy_clock_surface(&mut self) -> bool {
        let Some(layer) = self.layer.take() else {
            return false;
        };
        layer.wl_surface().destroy();
        log::debug!("Clock surface destroyed");
        true
    }

    /// Maps a square overlay of `side` pixels; its real size arrives with
    /// the first configure.
    pub fn create_clock_surface(&mut self, qh: &QueueHandle<AnalogClock>, side: u32) {
        let surface = self.compositor.create_surface(qh);
        let layer = self.layer_shell.create_layer_surface(
            qh,
            surface,
            Layer::Overlay,
            Some(NAMESPACE),
            None,
        );
        layer.set_keyboard_interactivity(KeyboardInteractivity::OnDemand);
        layer.set_size(side, side);
        layer.commit();
        log::debug!("Clock surface requested at {side}x{side}");
        self.layer = Some(layer);
    }
}

/// Bytes for one ARGB8888 frame of `side` x `side`.
fn pool_len(side: u32) -> anyhow::Result<usize> {
    let side = side as usize;
    side.checked_mul(side)
        .and_then(|pixels| pixels.checked_mul(4))
        .ok_or_else(|| anyhow::anyhow!("Clock side {side} is too large for a shm pool"))
}
