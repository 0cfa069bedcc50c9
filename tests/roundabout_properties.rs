mod util;

use lanelet_roundabout::prelude::*;
use proptest::prelude::*;
use util::{lanelet, line, poly, roundabout};

#[derive(Clone, Debug)]
enum AreaOp {
    Add(u64),
    Remove(u64),
}

fn area_op() -> impl Strategy<Value = AreaOp> {
    prop_oneof![
        (1u64..12).prop_map(AreaOp::Add),
        (1u64..12).prop_map(AreaOp::Remove),
    ]
}

/// Ordered-set model the area collection must agree with.
fn apply_model(model: &mut Vec<u64>, op: &AreaOp) -> Option<bool> {
    match *op {
        AreaOp::Add(a) => {
            if !model.contains(&a) {
                model.push(a);
            }
            None
        }
        AreaOp::Remove(a) => match model.iter().position(|&x| x == a) {
            Some(pos) => {
                model.remove(pos);
                Some(true)
            }
            None => Some(false),
        },
    }
}

#[test]
fn construction_roundtrip() {
    let rb = roundabout(5, 20, &[10, 11, 12]);
    assert_eq!(rb.roundabout_lanelet(), lanelet(1));
    assert_eq!(rb.roundabout_area(), vec![poly(20)]);
    assert_eq!(rb.stop_lines(), vec![line(10), line(11), line(12)]);
}

#[test]
fn remove_correctness() {
    let mut rb = roundabout(5, 1, &[]);
    rb.add_roundabout_area(poly(2));
    assert!(rb.remove_roundabout_area(poly(2)));
    assert_eq!(rb.roundabout_area(), vec![poly(1)]);
    assert!(!rb.remove_roundabout_area(poly(2)));
    assert_eq!(rb.roundabout_area(), vec![poly(1)]);
}

#[test]
fn order_preservation() {
    let mut rb = roundabout(5, 9, &[]);
    rb.remove_roundabout_area(poly(9));
    rb.add_roundabout_area(poly(1));
    rb.add_roundabout_area(poly(2));
    rb.remove_roundabout_area(poly(1));
    rb.add_roundabout_area(poly(3));
    assert_eq!(rb.roundabout_area(), vec![poly(2), poly(3)]);
}

proptest! {
    #[test]
    fn add_is_idempotent(initial in 1u64..50, extra in 1u64..50) {
        let mut once = roundabout(1, initial, &[]);
        once.add_roundabout_area(poly(extra));
        let mut twice = once.clone();
        twice.add_roundabout_area(poly(extra));
        prop_assert_eq!(once.roundabout_area(), twice.roundabout_area());
    }

    #[test]
    fn areas_behave_like_an_ordered_set(
        initial in 1u64..12,
        ops in proptest::collection::vec(area_op(), 0..40),
    ) {
        let mut rb = roundabout(1, initial, &[7]);
        let mut model = vec![initial];
        for op in &ops {
            let expected = apply_model(&mut model, op);
            let got = match *op {
                AreaOp::Add(a) => {
                    rb.add_roundabout_area(poly(a));
                    None
                }
                AreaOp::Remove(a) => Some(rb.remove_roundabout_area(poly(a))),
            };
            prop_assert_eq!(got, expected);
            prop_assert_eq!(
                rb.roundabout_area(),
                model.iter().copied().map(poly).collect::<Vec<_>>()
            );
        }
        rb.validate_invariants().unwrap();
    }

    #[test]
    fn identity_survives_area_mutation(
        ops in proptest::collection::vec(area_op(), 0..30),
    ) {
        let mut rb = roundabout(77, 1, &[3, 4]);
        let id = rb.id();
        let lane = rb.roundabout_lanelet();
        for op in &ops {
            match *op {
                AreaOp::Add(a) => rb.add_roundabout_area(poly(a)),
                AreaOp::Remove(a) => {
                    rb.remove_roundabout_area(poly(a));
                }
            }
        }
        prop_assert_eq!(rb.id(), id);
        prop_assert_eq!(rb.roundabout_lanelet(), lane);
        prop_assert_eq!(rb.rule_name(), Roundabout::RULE_NAME);
        prop_assert_eq!(rb.stop_lines(), vec![line(3), line(4)]);
    }
}
