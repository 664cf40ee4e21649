use std::{
    cell::{Cell, RefCell},
    collections::VecDeque,
    pin::pin,
    rc::Rc,
    time::Duration,
};

use cornichon::{Collection, Completion, Interpreter, Param, Vocabulary};
use futures::{channel::oneshot, poll, FutureExt as _};
use regex::Regex;
use tokio::time;

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

#[tokio::test]
async fn run_suspends_until_signal_fires() {
    let (tx, rx) = oneshot::channel::<()>();
    let rx = RefCell::new(Some(rx));
    let served = Rc::new(Cell::new(0));
    let counter = Rc::clone(&served);

    let steps = Collection::new()
        .step(re("^the oven is preheated$"), &[], move |_| {
            match rx.borrow_mut().take() {
                Some(rx) => Completion::after(rx.map(drop)),
                None => Completion::done(),
            }
        })
        .step(re("^the pie is served$"), &[], move |_| {
            counter.set(counter.get() + 1);
        });
    let interpreter = Interpreter::new(Vocabulary::english(), steps);

    let mut run = pin!(interpreter.run("tests/features/oven", ""));
    assert!(poll!(run.as_mut()).is_pending());
    assert!(poll!(run.as_mut()).is_pending());
    assert_eq!(served.get(), 0, "next step must wait for the signal");

    tx.send(()).unwrap();
    let report = run.await;

    assert!(report.success, "{}", report.transcript);
    assert_eq!(served.get(), 1, "run resumes exactly once");
}

#[tokio::test]
async fn run_suspends_inside_background_and_example_rows() {
    let (senders, receivers): (Vec<_>, VecDeque<_>) =
        (0..3).map(|_| oneshot::channel::<()>()).unzip();
    let receivers = RefCell::new(receivers);
    let log = Rc::new(RefCell::new(Vec::new()));
    let (rests, checks, bakes) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));

    let steps = Collection::new()
        .step(
            re("^the dough rests for (.+)$"),
            &[Param::Captures],
            move |args| {
                rests.borrow_mut().push(format!("wait {}", args.captures()[0]));
                match receivers.borrow_mut().pop_front() {
                    Some(rx) => Completion::after(rx.map(drop)),
                    None => Completion::done(),
                }
            },
        )
        .step(
            re("^the dough is checked after (.+)$"),
            &[Param::Captures],
            move |args| {
                checks.borrow_mut().push(format!("after {}", args.captures()[0]));
            },
        )
        .step(re("^the loaf is baked$"), &[], move |_| {
            bakes.borrow_mut().push("own".to_owned());
        });
    let interpreter = Interpreter::new(Vocabulary::english(), steps);

    let mut run = pin!(interpreter.run("tests/features/proofing", ""));
    for (tx, waiting) in senders.into_iter().zip(["bg", "1", "2"]) {
        assert!(poll!(run.as_mut()).is_pending());
        assert!(poll!(run.as_mut()).is_pending());
        assert_eq!(log.borrow().last().cloned(), Some(format!("wait {waiting}")));
        tx.send(()).unwrap();
    }
    let report = run.await;

    assert!(report.success, "{}", report.transcript);
    assert_eq!(
        *log.borrow(),
        ["wait bg", "after bg", "own", "wait 1", "after 1", "wait 2", "after 2"],
    );
}

#[tokio::test]
async fn timers_drive_completion() {
    let order = Rc::new(RefCell::new(Vec::new()));
    let (slow, fast) = (Rc::clone(&order), Rc::clone(&order));

    let steps = Collection::new()
        .step(re("^the oven is preheated$"), &[], move |_| {
            let slow = Rc::clone(&slow);
            Completion::after(async move {
                time::sleep(Duration::from_millis(20)).await;
                slow.borrow_mut().push("preheated");
            })
        })
        .step(re("^the pie is served$"), &[], move |_| {
            fast.borrow_mut().push("served");
        });

    let report = Interpreter::new(Vocabulary::english(), steps)
        .run("tests/features/oven", "")
        .await;

    assert!(report.success, "{}", report.transcript);
    assert_eq!(*order.borrow(), ["preheated", "served"]);
}

#[tokio::test]
async fn failed_signal_fails_the_step() {
    let served = Rc::new(Cell::new(false));
    let flag = Rc::clone(&served);

    let steps = Collection::new()
        .step(re("^the oven is preheated$"), &[], |_| {
            Completion::try_after(async { Err::<(), _>(anyhow::anyhow!("burnt")) })
        })
        .step(re("^the pie is served$"), &[], move |_| flag.set(true));

    let report = Interpreter::new(Vocabulary::english(), steps)
        .run("tests/features/oven", "")
        .await;

    assert!(!report.success);
    assert_eq!(report.error_message().as_deref(), Some("burnt"));
    assert!(!served.get());
}

#[tokio::test]
async fn panicking_signal_fails_the_step() {
    let steps = Collection::new()
        .step(re("^the oven is preheated$"), &[], |_| {
            Completion::after(async { panic!("oven exploded") })
        })
        .step(re("^the pie is served$"), &[], |_| ());

    let report = Interpreter::new(Vocabulary::english(), steps)
        .run("tests/features/oven", "")
        .await;

    assert_eq!(
        report.error_message().as_deref(),
        Some("Step panicked: oven exploded"),
    );
}
