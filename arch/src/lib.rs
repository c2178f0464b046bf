pub mod inst;
pub mod mode;
pub mod op;
pub mod table;

pub use inst::Encoding;
pub use mode::{AddressingMode, Index};
pub use op::Mnemonic;
pub use table::Missing;
