// src/posts/mod.rs
// =============================================================================
// Post records of the Jekyll catalog.
//
// Submodules:
// - front_matter: read/rewrite link, image, tag and remote_markdown
// - store: list, load and save the _posts/ directory
// - images: which posts lack their image file, and downloading one
// - stub: writing a brand new post
// =============================================================================

mod front_matter;
mod images;
mod store;
mod stub;

pub use front_matter::PostRecord;
pub use images::{download_image, find_missing_images, MissingImage, IMAGE_PREFIX};
pub use store::{load_posts, save_post};
pub use stub::{create_post, NewPost};
