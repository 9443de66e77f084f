pub(crate) mod format;
pub(crate) mod job;
pub(crate) mod sequence;
