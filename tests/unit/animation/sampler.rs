use super::*;

fn fps30() -> Fps {
    Fps::new(EXPORT_FPS, 1).unwrap()
}

#[test]
fn one_second_at_30_fps() {
    let sampler = FrameSampler::new(&AnimationSettings::new(1.0).unwrap(), fps30()).unwrap();
    assert_eq!(sampler.frame_count(), 30);
    assert!((sampler.frame_delay_ms() - 100.0 / 3.0).abs() < 1e-9);

    let frames: Vec<_> = sampler.frames().collect();
    assert_eq!(frames.len(), 30);
    assert_eq!(frames[0].1.as_slice(), &[Dot { progress: 0.0 }]);
    assert_eq!(frames[29].0, FrameIndex(29));
    assert!((frames[29].1[0].progress - 29.0 / 30.0).abs() < 1e-12);
}

#[test]
fn near_whole_totals_do_not_gain_a_frame() {
    // 2.2 * 30 is 66.00000000000001 in f64.
    let sampler = FrameSampler::new(&AnimationSettings::new(2.2).unwrap(), fps30()).unwrap();
    assert_eq!(sampler.frame_count(), 66);
}

#[test]
fn fractional_totals_round_up() {
    let sampler = FrameSampler::new(&AnimationSettings::new(0.51).unwrap(), fps30()).unwrap();
    // 15.3 frames -> 16, the last one sampled past 15/15.3.
    assert_eq!(sampler.frame_count(), 16);
    let base = sampler.base_progress(FrameIndex(15));
    assert!((base - 15.0 / 15.3).abs() < 1e-12);
}

#[test]
fn multi_dot_markers_are_phase_shifted() {
    let settings = AnimationSettings::new(1.0)
        .unwrap()
        .with_multi_dot(250.0)
        .unwrap();
    let sampler = FrameSampler::new(&settings, fps30()).unwrap();
    assert_eq!(sampler.marker_count(), 4);

    let dots = sampler.dots_at(FrameIndex(0));
    let got: Vec<f64> = dots.iter().map(|d| d.progress).collect();
    assert_eq!(got, vec![0.0, 0.75, 0.5, 0.25]);

    let dots = sampler.dots_at(FrameIndex(15));
    let got: Vec<f64> = dots.iter().map(|d| d.progress).collect();
    for (g, want) in got.iter().zip([0.5, 0.25, 0.0, 0.75]) {
        assert!((g - want).abs() < 1e-12, "{got:?}");
    }
}

#[test]
fn non_integral_marker_count_is_floored() {
    let settings = AnimationSettings::new(1.0)
        .unwrap()
        .with_multi_dot(300.0)
        .unwrap();
    let sampler = FrameSampler::new(&settings, fps30()).unwrap();
    assert_eq!(sampler.marker_count(), 3);

    let settings = AnimationSettings::new(1.0)
        .unwrap()
        .with_multi_dot(1500.0)
        .unwrap();
    let sampler = FrameSampler::new(&settings, fps30()).unwrap();
    assert_eq!(sampler.marker_count(), 0);
    assert!(sampler.dots_at(FrameIndex(3)).is_empty());
}

#[test]
fn sampling_is_pure() {
    let settings = AnimationSettings::new(2.0)
        .unwrap()
        .with_multi_dot(200.0)
        .unwrap();
    let sampler = FrameSampler::new(&settings, fps30()).unwrap();
    let a: Vec<_> = sampler.frames().collect();
    let b: Vec<_> = sampler.frames().collect();
    assert_eq!(a, b);
}
