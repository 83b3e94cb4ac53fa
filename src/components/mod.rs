// src/components/mod.rs

// レイアウトとアニメーションで使う、ただのデータたち！
pub mod card_visual;
pub mod position;
pub mod render_context;
pub mod transform;

pub use card_visual::CardVisual;
pub use position::Position;
pub use render_context::{PostAnimationCallback, RenderContext};
pub use transform::Transform;
