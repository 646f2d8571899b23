use nebula_one::{
    SceneConfig,
    data_structures::scene_graph::NodeKind,
    lifecycle::{FrameHandle, Mount, Phase},
};

use crate::common::test_utils::{RecordingBackend, RecordingHost};

mod common;

fn config() -> SceneConfig {
    SceneConfig::default().with_seed(7)
}

#[test]
fn should_skip_construction_without_surface() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let mut mount: Mount<RecordingBackend> = Mount::new(config());

    let mounted = mount.mount(&mut host, None).unwrap();

    assert!(!mounted);
    assert_eq!(mount.phase(), Phase::Unmounted);
    assert_eq!(host.mutations(), 0);
    assert_eq!(host.listeners(), 0);
    assert!(mount.staged().is_none());
}

#[test]
fn should_render_first_frame_on_mount() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let (backend, log) = RecordingBackend::new();
    let mut mount = Mount::new(config());

    assert!(mount.mount(&mut host, Some(backend)).unwrap());

    assert_eq!(mount.phase(), Phase::Running);
    let log = log.borrow();
    assert_eq!(log.uploads, 1);
    assert_eq!(log.renders, 1);
    assert_eq!(log.sizes, vec![(800, 600)]);
    assert_eq!(host.pending_frames(), 1);
    assert_eq!(host.listeners(), 1);
    assert!(mount.pending_frame().is_some());
}

#[test]
fn should_keep_one_frame_in_flight() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let (backend, log) = RecordingBackend::new();
    let mut mount = Mount::new(config());
    mount.mount(&mut host, Some(backend)).unwrap();

    for _ in 0..5 {
        let handle = host.next_frame().unwrap();
        assert!(mount.frame(&mut host, handle));
        assert_eq!(host.pending_frames(), 1);
    }

    assert_eq!(log.borrow().renders, 6);
    assert_eq!(log.borrow().uploads, 1);
}

#[test]
fn should_ignore_stale_frames() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let (backend, log) = RecordingBackend::new();
    let mut mount = Mount::new(config());
    mount.mount(&mut host, Some(backend)).unwrap();

    assert!(!mount.frame(&mut host, FrameHandle(9_999)));

    assert_eq!(log.borrow().renders, 1);
    assert_eq!(host.pending_frames(), 1);
}

#[test]
fn should_leave_nothing_scheduled_after_unmount() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let (backend, log) = RecordingBackend::new();
    let mut mount = Mount::new(config());
    mount.mount(&mut host, Some(backend)).unwrap();
    let handle = host.next_frame().unwrap();
    mount.frame(&mut host, handle);

    assert!(mount.unmount(&mut host));

    assert_eq!(mount.phase(), Phase::Unmounted);
    assert_eq!(host.pending_frames(), 0);
    assert_eq!(host.listeners(), 0);
    assert_eq!(log.borrow().releases, 1);
    assert!(mount.staged().is_none());
    assert!(mount.backend().is_none());
}

#[test]
fn should_release_only_once() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let (backend, log) = RecordingBackend::new();
    let mut mount = Mount::new(config());
    mount.mount(&mut host, Some(backend)).unwrap();

    assert!(mount.unmount(&mut host));
    assert!(!mount.unmount(&mut host));

    assert_eq!(log.borrow().releases, 1);
}

#[test]
fn should_not_render_after_unmount() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let (backend, log) = RecordingBackend::new();
    let mut mount = Mount::new(config());
    mount.mount(&mut host, Some(backend)).unwrap();
    let last = mount.pending_frame().unwrap();
    mount.unmount(&mut host);

    assert!(!mount.frame(&mut host, last));
    assert!(!mount.resize(&host));

    assert_eq!(log.borrow().renders, 1);
    assert_eq!(host.pending_frames(), 0);
}

#[test]
fn should_unmount_without_mount() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let mut mount: Mount<RecordingBackend> = Mount::new(config());

    assert!(!mount.unmount(&mut host));
    assert_eq!(host.mutations(), 0);
}

#[test]
fn should_release_when_upload_fails() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let (backend, log) = RecordingBackend::failing();
    let mut mount = Mount::new(config());

    let err = mount.mount(&mut host, Some(backend)).unwrap_err();

    assert!(format!("{:#}", err).contains("out of GPU memory"));
    assert_eq!(mount.phase(), Phase::Unmounted);
    assert_eq!(log.borrow().releases, 1);
    assert_eq!(log.borrow().renders, 0);
    assert_eq!(host.mutations(), 0);
}

#[test]
fn should_ignore_second_mount_while_running() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let (first, first_log) = RecordingBackend::new();
    let (second, second_log) = RecordingBackend::new();
    let mut mount = Mount::new(config());
    mount.mount(&mut host, Some(first)).unwrap();

    assert!(!mount.mount(&mut host, Some(second)).unwrap());

    assert_eq!(first_log.borrow().uploads, 1);
    assert_eq!(second_log.borrow().uploads, 0);
    assert_eq!(host.listeners(), 1);
    assert_eq!(host.pending_frames(), 1);
}

#[test]
fn should_mount_again_after_unmount() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let (first, first_log) = RecordingBackend::new();
    let (second, second_log) = RecordingBackend::new();
    let mut mount = Mount::new(config());

    mount.mount(&mut host, Some(first)).unwrap();
    mount.unmount(&mut host);
    assert!(mount.mount(&mut host, Some(second)).unwrap());

    assert_eq!(first_log.borrow().releases, 1);
    assert_eq!(second_log.borrow().uploads, 1);
    assert_eq!(host.listeners(), 1);
    assert_eq!(host.pending_frames(), 1);
}

#[test]
fn should_build_the_same_scene_for_the_same_seed() {
    let mut host = RecordingHost::new(800, 600, 1.0);
    let mut first = Mount::new(config());
    let mut second = Mount::new(config());
    first.mount(&mut host, Some(RecordingBackend::new().0)).unwrap();
    second.mount(&mut host, Some(RecordingBackend::new().0)).unwrap();

    let first = &first.staged().unwrap().scene;
    let second = &second.staged().unwrap().scene;
    let particles = first.find("particles").unwrap();
    let (a, b) = match (&first.node(particles).kind, &second.node(particles).kind) {
        (NodeKind::Points { geometry: a, .. }, NodeKind::Points { geometry: b, .. }) => {
            (first.geometry(*a), second.geometry(*b))
        }
        _ => panic!("particles should be a points node"),
    };
    assert_eq!(a, b);
}
