use smithay_client_toolkit::{
    compositor::CompositorHandler,
    delegate_compositor, delegate_keyboard, delegate_layer, delegate_output, delegate_registry,
    delegate_seat, delegate_shm,
    output::{OutputHandler, OutputState},
    registry::{ProvidesRegistryState, RegistryState},
    registry_handlers,
    seat::{
        Capability, SeatHandler, SeatState,
        keyboard::{KeyEvent, KeyboardHandler, Keysym, Modifiers, RawModifiers},
    },
    shell::wlr_layer::{LayerShellHandler, LayerSurface, LayerSurfaceConfigure},
    shm::{Shm, ShmHandler},
};
use wayland_client::{
    Connection, QueueHandle,
    protocol::{wl_keyboard, wl_output, wl_seat, wl_surface},
};

use crate::AnalogClock;

impl CompositorHandler for AnalogClock {
    fn scale_factor_changed(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_surface::WlSurface,
        _: i32,
    ) {
    }
    fn transform_changed(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_surface::WlSurface,
        _: wl_output::Transform,
    ) {
    }
    fn frame(&mut self, _: &Connection, _: &QueueHandle<Self>, _: &wl_surface::WlSurface, _: u32) {}
    fn surface_enter(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_surface::WlSurface,
        _: &wl_output::WlOutput,
    ) {
    }
    fn surface_leave(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_surface::WlSurface,
        _: &wl_output::WlOutput,
    ) {
    }
}

impl OutputHandler for AnalogClock {
    fn output_state(&mut self) -> &mut OutputState {
        &mut self.wl.output_state
    }

    // A surface closed along with its output comes back on the next one
    fn new_output(&mut self, _: &Connection, qh: &QueueHandle<Self>, _: wl_output::WlOutput) {
        if self.is_shown() || self.wl.exit {
            return;
        }

        log::info!("Output added, recreating clock surface");
        if let Err(e) = self.show(qh) {
            log::error!("Failed to recreate clock surface: {e:#}");
            self.wl.exit = true;
        }
    }

    fn update_output(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        output: wl_output::WlOutput,
    ) {
        if let Some(info) = self.wl.output_state.info(&output) {
            log::debug!("Output {:?} changed, scale {}", info.name, info.scale_factor);
        }
    }

    fn output_destroyed(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        output: wl_output::WlOutput,
    ) {
        let name = self.wl.output_state.info(&output).and_then(|info| info.name);
        // The destroyed output is still listed while this runs
        let remaining = self
            .wl
            .output_state
            .outputs()
            .filter(|other| *other != output)
            .count();
        log::info!("Output {name:?} removed, {remaining} left");

        if remaining == 0 && self.is_shown() {
            self.hide();
        }
    }
}

impl LayerShellHandler for AnalogClock {
    fn closed(&mut self, _conn: &Connection, _qh: &QueueHandle<Self>, _layer: &LayerSurface) {
        log::info!("Clock surface closed by the compositor");
        self.hide();
    }

    fn configure(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _layer: &LayerSurface,
        configure: LayerSurfaceConfigure,
        _serial: u32,
    ) {
        let (width, height) = configure.new_size;
        self.on_configure(width, height);
    }
}

impl SeatHandler for AnalogClock {
    fn seat_state(&mut self) -> &mut SeatState {
        &mut self.wl.seat_state
    }

    fn new_seat(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_seat::WlSeat) {}

    fn new_capability(
        &mut self,
        _conn: &Connection,
        qh: &QueueHandle<Self>,
        seat: wl_seat::WlSeat,
        capability: Capability,
    ) {
        if capability == Capability::Keyboard && self.wl.keyboard.is_none() {
            match self.wl.seat_state.get_keyboard(qh, &seat, None) {
                Ok(keyboard) => self.wl.keyboard = Some(keyboard),
                Err(e) => log::warn!("Failed to create keyboard: {e}"),
            }
        }
    }

    fn remove_capability(
        &mut self,
        _conn: &Connection,
        _: &QueueHandle<Self>,
        _: wl_seat::WlSeat,
        capability: Capability,
    ) {
        if capability == Capability::Keyboard
            && let Some(keyboard) = self.wl.keyboard.take()
        {
            keyboard.release();
        }
    }

    fn remove_seat(&mut self, _: &Connection, _: &QueueHandle<Self>, _: wl_seat::WlSeat) {}
}

impl KeyboardHandler for AnalogClock {
    fn enter(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: &wl_surface::WlSurface,
        _: u32,
        _: &[u32],
        _: &[Keysym],
    ) {
    }

    fn leave(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: &wl_surface::WlSurface,
        _: u32,
    ) {
    }

    fn press_key(
        &mut self,
        _conn: &Connection,
        _qh: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: u32,
        event: KeyEvent,
    ) {
        let pressed_key = event.keysym;

        // Exit on `esc` or `q`
        if pressed_key == Keysym::Escape || pressed_key == Keysym::q {
            self.wl.exit = true;
        }
    }

    fn repeat_key(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: u32,
        _: KeyEvent,
    ) {
    }

    fn release_key(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: u32,
        _: KeyEvent,
    ) {
    }

    fn update_modifiers(
        &mut self,
        _: &Connection,
        _: &QueueHandle<Self>,
        _: &wl_keyboard::WlKeyboard,
        _: u32,
        _: Modifiers,
        _: RawModifiers,
        _: u32,
    ) {
    }
}

impl ShmHandler for AnalogClock {
    fn shm_state(&mut self) -> &mut Shm {
        &mut self.wl.shm
    }
}

delegate_compositor!(AnalogClock);
delegate_output!(AnalogClock);
delegate_shm!(AnalogClock);
delegate_seat!(AnalogClock);
delegate_keyboard!(AnalogClock);
delegate_layer!(AnalogClock);
delegate_registry!(AnalogClock);

impl ProvidesRegistryState for AnalogClock {
    fn registry(&mut self) -> &mut RegistryState {
        &mut self.wl.registry_state
    }
    registry_handlers![OutputState, SeatState];
}
