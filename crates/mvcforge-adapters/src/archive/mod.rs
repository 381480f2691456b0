//! Archive extraction adapters.

mod targz;

pub use targz::TarGzExtractor;
