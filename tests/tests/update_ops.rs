mod gradient_descent {
    use std::sync::{Arc, Mutex};

    use rand::thread_rng;
    use share_core::protocols::ProtocolError;
    use share_core::protocols::additive::{AdditiveProtocol, PartyID};
    use share_core::protocols::plain::{PlainOps, PlainProtocol};
    use share_core::traits::{Protocol, SecureOps};
    use share_core::types::OpAttributes;
    use share_core::{MsgId, ShareBuffer, ShareValue};
    use tests::{combine_variables, encode_all, reference_step, two_party_setup};
    use train_ops::{ScalarOperand, UpdateConfig, UpdateError, apply_gradient_descent};

    #[test]
    fn two_party_step_matches_the_plaintext_reference() {
        let mut rng = thread_rng();
        let var_values = [10.0, 20.0];
        let delta_values = [4.0, 6.0];
        let mut setup = two_party_setup(&var_values, &delta_values, &mut rng);

        let msg_id = MsgId::new("grad_w/step_0");
        for (id, var, delta) in itertools::izip!(
            [PartyID::ID0, PartyID::ID1],
            setup.vars.iter_mut(),
            setup.deltas.iter()
        ) {
            apply_gradient_descent(
                &AdditiveProtocol::new(id),
                &msg_id,
                var,
                &ScalarOperand::public(0.5),
                delta,
                &UpdateConfig::default(),
            )
            .unwrap();
        }

        let combined = combine_variables(&setup.vars);
        assert_eq!(combined, vec![8.0, 17.0]);
        let reference = reference_step(&var_values, 0.5, &delta_values);
        assert_eq!(encode_all(&combined), encode_all(&reference));
    }

    #[test]
    fn two_party_step_on_a_larger_tensor() {
        let mut rng = thread_rng();
        // values on the quarter grid keep the canonical encoding exact
        let var_values: Vec<f64> = (0..64).map(|i| f64::from(i * 3 - 70)).collect();
        let delta_values: Vec<f64> = (0..64).map(|i| f64::from(i - 32) * 2.0).collect();
        let mut setup = two_party_setup(&var_values, &delta_values, &mut rng);

        let msg_id = MsgId::new("grad_w/step_1");
        for (id, var, delta) in itertools::izip!(
            [PartyID::ID0, PartyID::ID1],
            setup.vars.iter_mut(),
            setup.deltas.iter()
        ) {
            apply_gradient_descent(
                &AdditiveProtocol::new(id),
                &msg_id,
                var,
                &ScalarOperand::public(0.25),
                delta,
                &UpdateConfig::default(),
            )
            .unwrap();
        }

        let combined = combine_variables(&setup.vars);
        let reference = reference_step(&var_values, 0.25, &delta_values);
        assert_eq!(encode_all(&combined), encode_all(&reference));
    }

    #[test]
    fn shared_alpha_drops_the_constant_tag_and_aborts_locally() {
        // the local additive engine has no triples, so an alpha that is a
        // secret share (not a broadcast constant) must fail the multiply and
        // leave the buffer unchanged
        let mut rng = thread_rng();
        let mut setup = two_party_setup(&[10.0], &[4.0], &mut rng);
        let before = setup.vars[0].buffer().unwrap().clone();

        let alpha = ScalarOperand::share(ShareValue::new("0.500000"));
        let err = apply_gradient_descent(
            &AdditiveProtocol::new(PartyID::ID0),
            &MsgId::new("grad_w/step_0"),
            &mut setup.vars[0],
            &alpha,
            &setup.deltas[0],
            &UpdateConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(
            err,
            UpdateError::Protocol(ProtocolError::UnsupportedOperation(_))
        ));
        assert_eq!(setup.vars[0].buffer().unwrap(), &before);
    }

    struct FailingSubProtocol;

    struct FailingSubOps {
        inner: PlainOps,
    }

    impl Protocol for FailingSubProtocol {
        type Ops = FailingSubOps;

        fn ops(&self, msg_id: &MsgId) -> FailingSubOps {
            FailingSubOps {
                inner: PlainProtocol.ops(msg_id),
            }
        }
    }

    impl SecureOps for FailingSubOps {
        fn mul(
            &mut self,
            lhs: &[ShareValue],
            rhs: &[ShareValue],
            attrs: &OpAttributes,
        ) -> Result<ShareBuffer, ProtocolError> {
            self.inner.mul(lhs, rhs, attrs)
        }

        fn sub(
            &mut self,
            _lhs: &[ShareValue],
            _rhs: &[ShareValue],
            _attrs: &OpAttributes,
        ) -> Result<ShareBuffer, ProtocolError> {
            Err(ProtocolError::Io(std::io::Error::new(
                std::io::ErrorKind::BrokenPipe,
                "connection reset during reshare",
            )))
        }
    }

    #[test]
    fn failure_after_partial_pipeline_progress_commits_nothing() {
        let mut var = tests::plain_variable("w", &[10.0, 20.0]);
        let before = var.buffer().unwrap().clone();
        let delta = train_ops::ShareTensor::new(
            share_core::TensorShape::new(vec![2]),
            encode_all(&[4.0, 6.0]),
        )
        .unwrap();

        let err = apply_gradient_descent(
            &FailingSubProtocol,
            &MsgId::new("grad_w/step_0"),
            &mut var,
            &ScalarOperand::public(0.5),
            &delta,
            &UpdateConfig::default(),
        )
        .unwrap_err();

        assert!(matches!(err, UpdateError::Protocol(ProtocolError::Io(_))));
        assert_eq!(var.buffer().unwrap(), &before);
    }

    #[derive(Clone, Default)]
    struct RecordingProtocol {
        log: Arc<Mutex<Vec<(&'static str, bool, bool)>>>,
    }

    struct RecordingOps {
        inner: PlainOps,
        log: Arc<Mutex<Vec<(&'static str, bool, bool)>>>,
    }

    impl Protocol for RecordingProtocol {
        type Ops = RecordingOps;

        fn ops(&self, msg_id: &MsgId) -> RecordingOps {
            RecordingOps {
                inner: PlainProtocol.ops(msg_id),
                log: Arc::clone(&self.log),
            }
        }
    }

    impl SecureOps for RecordingOps {
        fn mul(
            &mut self,
            lhs: &[ShareValue],
            rhs: &[ShareValue],
            attrs: &OpAttributes,
        ) -> Result<ShareBuffer, ProtocolError> {
            self.log
                .lock()
                .unwrap()
                .push(("mul", attrs.lh_is_const(), attrs.rh_is_const()));
            self.inner.mul(lhs, rhs, attrs)
        }

        fn sub(
            &mut self,
            lhs: &[ShareValue],
            rhs: &[ShareValue],
            attrs: &OpAttributes,
        ) -> Result<ShareBuffer, ProtocolError> {
            self.log
                .lock()
                .unwrap()
                .push(("sub", attrs.lh_is_const(), attrs.rh_is_const()));
            self.inner.sub(lhs, rhs, attrs)
        }
    }

    #[test]
    fn primitive_calls_are_ordered_and_tagged_per_call() {
        let protocol = RecordingProtocol::default();
        let mut var = tests::plain_variable("w", &[10.0, 20.0]);
        let delta = train_ops::ShareTensor::new(
            share_core::TensorShape::new(vec![2]),
            encode_all(&[4.0, 6.0]),
        )
        .unwrap();

        apply_gradient_descent(
            &protocol,
            &MsgId::new("grad_w/step_0"),
            &mut var,
            &ScalarOperand::public(0.5),
            &delta,
            &UpdateConfig::default(),
        )
        .unwrap();

        let log = protocol.log.lock().unwrap();
        assert_eq!(*log, vec![("mul", true, false), ("sub", false, false)]);
    }
}

mod assign {
    use rand::thread_rng;
    use share_core::protocols::additive;
    use tests::{combine_variables, two_party_setup};
    use train_ops::{UpdateConfig, UpdateError, assign};

    #[test]
    fn two_party_assign_replaces_the_contents() {
        let mut rng = thread_rng();
        let mut setup = two_party_setup(&[1.0, 2.0], &[0.0, 0.0], &mut rng);
        let [source0, source1] = additive::share_values(&[7.0, -3.5], &mut rng);

        assign(&mut setup.vars[0], &source0, &UpdateConfig::default()).unwrap();
        assign(&mut setup.vars[1], &source1, &UpdateConfig::default()).unwrap();

        assert_eq!(combine_variables(&setup.vars), vec![7.0, -3.5]);
    }

    #[test]
    fn locking_is_rejected_for_assign_as_well() {
        let mut rng = thread_rng();
        let mut setup = two_party_setup(&[1.0], &[0.0], &mut rng);
        let before = setup.vars[0].buffer().unwrap().clone();
        let [source0, _] = additive::share_values(&[9.0], &mut rng);

        let err = assign(
            &mut setup.vars[0],
            &source0,
            &UpdateConfig { use_locking: true },
        )
        .unwrap_err();

        assert!(matches!(err, UpdateError::UnsupportedLocking));
        assert_eq!(setup.vars[0].buffer().unwrap(), &before);
    }

    #[test]
    fn assign_then_descend_lifecycle() {
        use share_core::protocols::additive::{AdditiveProtocol, PartyID};
        use share_core::{DType, MsgId, TensorShape};
        use tests::{encode_all, reference_step};
        use train_ops::{
            ScalarOperand, StorageKind, Variable, apply_gradient_descent,
        };

        let mut rng = thread_rng();
        let initial = [100.0, -50.0, 25.0];
        let gradient = [8.0, -4.0, 2.0];
        let shape = TensorShape::new(vec![3]);
        let [init0, init1] = additive::share_values(&initial, &mut rng);
        let setup = two_party_setup(&[0.0, 0.0, 0.0], &gradient, &mut rng);

        // fresh, uninitialized variables; assign performs the first commit
        let mut vars = [
            Variable::new("w", shape.clone(), DType::Double, StorageKind::Ref),
            Variable::new("w", shape.clone(), DType::Double, StorageKind::Ref),
        ];
        assign(&mut vars[0], &init0, &UpdateConfig::default()).unwrap();
        assign(&mut vars[1], &init1, &UpdateConfig::default()).unwrap();

        for step in 0..2 {
            let msg_id = MsgId::new(format!("grad_w/step_{step}"));
            for (id, var, delta) in itertools::izip!(
                [PartyID::ID0, PartyID::ID1],
                vars.iter_mut(),
                setup.deltas.iter()
            ) {
                apply_gradient_descent(
                    &AdditiveProtocol::new(id),
                    &msg_id,
                    var,
                    &ScalarOperand::public(0.5),
                    delta,
                    &UpdateConfig::default(),
                )
                .unwrap();
            }
        }

        let after_one = reference_step(&initial, 0.5, &gradient);
        let after_two = reference_step(&after_one, 0.5, &gradient);
        assert_eq!(
            encode_all(&combine_variables(&vars)),
            encode_all(&after_two)
        );
    }
}
