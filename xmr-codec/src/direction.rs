/// Which way a [`crate::archive::Archive`] is currently walking a message.
///
/// Every primitive method on `Archive` takes a `&mut T` slot and consults
/// its own direction internally, so a single [`crate::Message::serialize`]
/// body handles both reading and writing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dir {
    Load,
    Dump,
}

impl Dir {
    pub fn is_load(self) -> bool {
        matches!(self, Dir::Load)
    }

    pub fn is_dump(self) -> bool {
        matches!(self, Dir::Dump)
    }
}
