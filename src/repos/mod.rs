//! Repository layer: thin free functions over the session store.

pub mod sessions;
