use mockall::mock;
use oocore::core::units::{Completion, ExecutionUnit, IssueOutcome, IssueRequest, UnitClass};

mock! {
    pub Unit {}

    impl ExecutionUnit for Unit {
        fn class(&self) -> UnitClass;
        fn can_accept(&self) -> bool;
        fn issue(&mut self, req: IssueRequest) -> IssueOutcome;
        fn tick(&mut self);
        fn poll_result(&mut self) -> Option<Completion>;
        fn flush(&mut self);
        fn is_idle(&self) -> bool;
    }
}

/// A unit of `class` that claims a free port every cycle but refuses every operation.
pub fn refusing_unit(class: UnitClass) -> MockUnit {
    let mut unit = MockUnit::new();
    let _ = unit.expect_class().return_const(class);
    let _ = unit.expect_can_accept().return_const(true);
    let _ = unit.expect_issue().returning(|_| IssueOutcome::Busy);
    let _ = unit.expect_tick().return_const(());
    let _ = unit.expect_poll_result().returning(|| None);
    let _ = unit.expect_flush().return_const(());
    let _ = unit.expect_is_idle().return_const(true);
    unit
}

/// A unit of `class` that must never receive an operation and must be flushed `flushes` times.
pub fn idle_unit(class: UnitClass, flushes: usize) -> MockUnit {
    let mut unit = MockUnit::new();
    let _ = unit.expect_class().return_const(class);
    let _ = unit.expect_can_accept().return_const(true);
    let _ = unit.expect_issue().never();
    let _ = unit.expect_tick().return_const(());
    let _ = unit.expect_poll_result().returning(|| None);
    let _ = unit.expect_flush().times(flushes).return_const(());
    let _ = unit.expect_is_idle().return_const(true);
    unit
}
