mod application;

mod presentation {
    pub mod cli;
    pub mod report;
}

use keysift_core::error::Result;

fn main() -> Result<()> {
    application::run()
}
