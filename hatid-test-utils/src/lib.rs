pub mod error;
pub mod fixtures;
pub mod setup;

pub use error::TestError;
pub use setup::TestSetup;

pub mod prelude {
    pub use crate::{fixtures, test_setup_with_relief_tables, TestError, TestSetup};
}
