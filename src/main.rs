use clap::Parser;
use winit::event_loop::{ControlFlow, EventLoop};

use shader_lab::app::App;
use shader_lab::cli::Cli;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let cli = Cli::parse();

    log::info!("starting demo '{}'", cli.demo.config().name);

    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = App::new(cli);
    event_loop.run_app(&mut app)?;

    Ok(())
}
