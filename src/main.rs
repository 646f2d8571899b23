use nebula_one::{SceneConfig, Variant};

fn main() -> anyhow::Result<()> {
    let variant = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Variant>()?,
        None => Variant::default(),
    };
    nebula_one::run(SceneConfig::default().with_variant(variant))
}
