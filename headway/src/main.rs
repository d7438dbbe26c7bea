//! batch entry point for the headway pipeline. operations recompute
//! their derived relation wholesale from the current snapshot directory
//! and upsert the result, so a cron-driven rerun is always safe.
use clap::Parser;
use headway::app::HeadwayApp;

fn main() {
    env_logger::init();
    let args = HeadwayApp::parse();
    if let Err(e) = args.run() {
        log::error!("headway failed: {e}");
        std::process::exit(1);
    }
}
