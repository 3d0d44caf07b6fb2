use smithay_client_toolkit::reexports::{calloop::EventLoop, calloop_wayland_source::WaylandSource};
use wayland_client::{Connection, globals};

use analog_clock::{AnalogClock, Config, Wayland};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = Config::from_env();

    let conn = Connection::connect_to_env()?;
    let (globals, event_queue) = globals::registry_queue_init(&conn)?;
    let qh = event_queue.handle();

    let mut event_loop: EventLoop<AnalogClock> = EventLoop::try_new()?;
    let loop_handle = event_loop.handle();

    WaylandSource::new(conn, event_queue)
        .insert(loop_handle.clone())
        .map_err(|e| e.error)?;

    let wl = Wayland::new(&globals, &qh, config.side)?;
    let mut app = AnalogClock::new(wl, config, loop_handle);
    app.show(&qh)?;

    loop {
        event_loop.dispatch(None, &mut app)?;

        app.draw()?;

        if app.wl.exit {
            break;
        }
    }

    app.hide();
    log::info!("Exiting analog-clock");

    Ok(())
}
