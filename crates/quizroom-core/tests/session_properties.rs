//! Property tests: arbitrary input sequences never break answer alignment
//! or submit more than once.

mod common;

use std::sync::Arc;

use common::{controller, rating, FakeScoringService, DELAY};
use proptest::prelude::*;
use quizroom_core::{SessionConfig, SessionState};

#[derive(Debug, Clone)]
enum Input {
    Rate(i64),
    Back,
    Wait,
}

fn input() -> impl Strategy<Value = Input> {
    prop_oneof![
        4 => (1i64..=5).prop_map(Input::Rate),
        1 => Just(Input::Back),
        3 => Just(Input::Wait),
    ]
}

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .unwrap()
}

proptest! {
    #[test]
    fn prop_inputs_keep_alignment_and_single_submission(
        n in 1usize..8,
        inputs in prop::collection::vec(input(), 0..60),
    ) {
        runtime().block_on(async {
            let service = Arc::new(FakeScoringService::new(n));
            let (mut ctl, clock) = controller(&service, SessionConfig::default());
            ctl.load().await.unwrap();
            ctl.start().await.unwrap();

            for step in inputs {
                if ctl.state() == SessionState::Completed {
                    break;
                }
                match step {
                    Input::Rate(v) => {
                        let index = ctl.current_index();
                        if ctl.rate(rating(v)).unwrap().is_accepted() {
                            prop_assert_eq!(ctl.answers().get(index), Some(rating(v)));
                        }
                    }
                    Input::Back => {
                        ctl.go_back().unwrap();
                    }
                    Input::Wait => {
                        clock.advance(DELAY);
                        ctl.tick().await.unwrap();
                    }
                }

                prop_assert_eq!(ctl.answers().len(), n);
                prop_assert!(ctl.current_index() < n);
                prop_assert!(service.submit_calls() <= 1);
            }

            if ctl.state() == SessionState::Completed {
                prop_assert_eq!(service.submit_calls(), 1);
                let (_, submitted) = service.last_submission().unwrap();
                prop_assert!(submitted.iter().all(|v| (1..=5).contains(v)));
            } else {
                prop_assert_eq!(service.submit_calls(), 0);
            }
            Ok(())
        })?;
    }

    #[test]
    fn prop_straight_traversal_submits_given_ratings(
        ratings in prop::collection::vec(1i64..=5, 1..12),
    ) {
        runtime().block_on(async {
            let service = Arc::new(FakeScoringService::new(ratings.len()));
            let (mut ctl, clock) = controller(&service, SessionConfig::default());
            ctl.load().await.unwrap();
            ctl.start().await.unwrap();

            for (i, v) in ratings.iter().enumerate() {
                prop_assert_eq!(ctl.current_index(), i);
                prop_assert!(ctl.rate(rating(*v)).unwrap().is_accepted());
                clock.advance(DELAY);
                ctl.tick().await.unwrap();
            }

            prop_assert_eq!(ctl.state(), SessionState::Completed);
            let expected: Vec<u8> = ratings.iter().map(|v| *v as u8).collect();
            prop_assert_eq!(service.last_submission().unwrap().1, expected);
            Ok(())
        })?;
    }
}
