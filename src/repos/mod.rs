//! Persistence seam. The engine loads a whole [`Game`] aggregate, mutates it,
//! and saves it back; the host guarantees mutations for one game id are
//! serialized, so a save never races another writer of the same game.

pub mod games;
pub mod memory;

pub use games::GameRepository;
pub use memory::InMemoryGameRepository;
