use nebula_one::{
    data_structures::texture::Texture,
    pipelines::{basic, basic::DepthMode, points, transparent},
};

#[test]
fn should_write_depth_only_for_opaque_meshes() {
    assert_eq!(basic::DEPTH_MODE, DepthMode::TestAndWrite);
    assert_eq!(transparent::DEPTH_MODE, DepthMode::TestOnly);
    assert_eq!(points::DEPTH_MODE, DepthMode::TestOnly);
}

#[test]
fn should_keep_depth_test_for_blended_geometry() {
    let opaque = DepthMode::TestAndWrite.state(Texture::DEPTH_FORMAT);
    let blended = DepthMode::TestOnly.state(Texture::DEPTH_FORMAT);

    assert!(opaque.depth_write_enabled);
    assert!(!blended.depth_write_enabled);
    assert_eq!(blended.depth_compare, wgpu::CompareFunction::Less);
    assert_eq!(blended.format, opaque.format);
}
