mod application;

mod presentation {
    pub mod cli;
}

fn main() -> miniscope_core::error::Result<()> {
    application::run()
}
