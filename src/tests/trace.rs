use super::*;
use crate::trace::{AccumulationStep, Activation};

#[derive(Default)]
struct Recorder {
    steps: Vec<AccumulationStep<i32>>,
    activations: Vec<Activation<i32>>,
}

impl Trace<i32> for Recorder {
    fn accumulate(&mut self, step: &AccumulationStep<i32>) {
        self.steps.push(*step);
    }
    fn activate(&mut self, activation: &Activation<i32>) {
        self.activations.push(*activation);
    }
}

#[test]
fn every_accumulation_step_is_reported() {
    let mut recorder = Recorder::default();
    let mut output = [[[0; 3]; 3]; 4];

    TestLayer::new().convolution_max_pool_traced(
        &*IMAGE,
        &*WEIGHTS,
        &*BIASES,
        &mut output,
        &mut recorder,
    );

    assert_eq!(recorder.steps.len(), 4 * 7 * 7 * 3 * 3);
    assert_eq!(recorder.activations.len(), 4 * 7 * 7);
    // Running sums are consistent with the reported products
    for window in recorder.steps.chunks(9) {
        let mut sum = 0;
        for step in window {
            sum += step.input * step.weight;
            assert_eq!(step.sum, sum);
            assert_eq!(step.input, IMAGE[step.row + step.y][step.col + step.x]);
            assert_eq!(step.weight, WEIGHTS[step.kernel][step.y][step.x]);
        }
    }
    for a in &recorder.activations {
        assert_eq!(a.bias, BIASES[a.kernel]);
        assert_eq!(a.output, relu(a.sum + a.bias));
    }
}

#[test]
fn traced_and_untraced_outputs_agree() {
    init_logging();

    let mut traced = [[[0; 3]; 3]; 4];
    TestLayer::new().convolution_max_pool_traced(
        &*IMAGE,
        &*WEIGHTS,
        &*BIASES,
        &mut traced,
        &mut LogTrace,
    );
    let mut untraced = [[[0; 3]; 3]; 4];
    TestLayer::new().convolution_max_pool(&*IMAGE, &*WEIGHTS, &*BIASES, &mut untraced);

    assert_eq!(traced, untraced);
}

#[test]
fn trace_can_be_borrowed() {
    let mut recorder = Recorder::default();
    let mut output = [[[0; 2]; 2]; 1];
    let layer = ConvMaxpoolLayer::<4, 2, 1, 2, 1, 3, 2>::new();

    for _ in 0..2 {
        let mut borrowed = &mut recorder;
        layer.convolution_max_pool_traced(
            &[[1; 4]; 4],
            &[[[1, 0], [0, 1]]],
            &[0],
            &mut output,
            &mut borrowed,
        );
    }

    assert_eq!(recorder.activations.len(), 2 * 9);
    assert!(recorder.activations.iter().all(|a| a.output == 2));
}
