use std::{cell::RefCell, rc::Rc};

use cornichon::{
    Coloring, Collection, Config, Error, Interpreter, Param, Vocabulary,
};
use regex::Regex;

#[derive(Debug, Default)]
struct Basket {
    cucumbers: u32,
    log: Vec<String>,
}

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).unwrap()
}

fn number(args: &cornichon::Args<'_>) -> anyhow::Result<u32> {
    Ok(args.capture(0).unwrap_or_default().parse()?)
}

fn steps(basket: &Rc<RefCell<Basket>>) -> Collection {
    let refill = Rc::clone(basket);
    let start = Rc::clone(basket);
    let eat = Rc::clone(basket);
    let left = Rc::clone(basket);

    Collection::new()
        .step(re("^the basket is refilled$"), &[], move |_| {
            refill.borrow_mut().log.push("refill".into());
        })
        .step(
            re(r"^there are (\d+) cucumbers$"),
            &[Param::Captures],
            move |args| -> anyhow::Result<()> {
                let n = number(&args)?;
                let mut basket = start.borrow_mut();
                basket.cucumbers = n;
                basket.log.push(format!("start {n}"));
                Ok(())
            },
        )
        .step(
            re(r"^I eat (\d+) cucumbers$"),
            &[Param::Captures],
            move |args| -> anyhow::Result<()> {
                let n = number(&args)?;
                let mut basket = eat.borrow_mut();
                anyhow::ensure!(basket.cucumbers >= n, "not enough cucumbers");
                basket.cucumbers -= n;
                basket.log.push(format!("eat {n}"));
                Ok(())
            },
        )
        .step(
            re(r"^I should have (\d+) cucumbers$"),
            &[Param::Captures],
            move |args| -> anyhow::Result<()> {
                let n = number(&args)?;
                let mut basket = left.borrow_mut();
                anyhow::ensure!(
                    basket.cucumbers == n,
                    "expected {n} cucumbers, found {}",
                    basket.cucumbers,
                );
                basket.log.push(format!("left {n}"));
                Ok(())
            },
        )
}

fn interpreter(basket: &Rc<RefCell<Basket>>) -> Interpreter {
    Interpreter::new(Vocabulary::english(), steps(basket))
        .with_config(Config::default().coloring(Coloring::Never))
}

#[tokio::test]
async fn runs_scenarios_and_every_example_row() {
    let basket = Rc::new(RefCell::new(Basket::default()));

    let report = interpreter(&basket)
        .run("tests/features/eating.feature", "")
        .await;

    assert!(report.success, "{}", report.transcript);
    assert!(report.error.is_none());
    assert_eq!(
        basket.borrow().log,
        [
            "refill", "start 12", "eat 5", "left 7", "start 12", "eat 5",
            "left 7", "start 20", "eat 5", "left 15",
        ],
    );
    assert!(report
        .transcript
        .contains("    Then I should have 15 cucumbers\n"));
    assert!(report
        .transcript
        .contains("      | 20    | 5   | 15   |\n"));
}

#[tokio::test]
async fn extension_is_optional() {
    let basket = Rc::new(RefCell::new(Basket::default()));

    let report = interpreter(&basket).run("tests/features/eating", "").await;

    assert!(report.success, "{}", report.transcript);
}

#[test]
fn blocking_run_finishes_without_signals() {
    let basket = Rc::new(RefCell::new(Basket::default()));

    let report = interpreter(&basket).run_blocking("tests/features/eating", "");

    assert!(report.success, "{}", report.transcript);
    assert_eq!(basket.borrow().log.len(), 10);
}

#[tokio::test]
async fn missing_file_fails_the_report() {
    let basket = Rc::new(RefCell::new(Basket::default()));

    let report = interpreter(&basket)
        .run("tests/features/nowhere", "")
        .await;

    assert!(!report.success);
    assert!(matches!(report.error, Some(Error::Read { .. })));
    assert!(report.transcript.starts_with("^^^^^^ Failed to read"));
    assert!(basket.borrow().log.is_empty());
}

#[tokio::test]
async fn background_is_replayed_per_scenario_in_transcript() {
    let basket = Rc::new(RefCell::new(Basket::default()));

    let report = interpreter(&basket)
        .run_text(
            "Feature: f\n\
             \x20 Background:\n\
             \x20   Given the basket is refilled\n\
             \n\
             \x20 Scenario: s\n\
             \x20   Given there are 3 cucumbers\n",
            "",
        )
        .await;

    assert!(report.success);
    assert_eq!(
        report.transcript,
        "Feature: f\n\
         \x20 Background:\n\
         \x20   Given the basket is refilled\n\
         \n\
         \x20 Scenario: s\n\
         \x20   Given the basket is refilled\n\
         \x20   Given there are 3 cucumbers\n",
    );
}

#[tokio::test]
async fn steps_outside_scenarios_are_only_recorded() {
    let basket = Rc::new(RefCell::new(Basket::default()));

    let report = interpreter(&basket)
        .run_text(
            "Feature: f\n\
             \x20 Given there are 3 cucumbers\n\
             \x20 Scenario Outline: never expanded\n\
             \x20   When I eat 1 cucumbers\n",
            "",
        )
        .await;

    assert!(report.success);
    assert!(basket.borrow().log.is_empty());
    assert_eq!(report.transcript.lines().count(), 4);
}

#[tokio::test]
async fn first_registered_pattern_wins() {
    let hits = Rc::new(RefCell::new(Vec::new()));
    let (specific, generic) = (Rc::clone(&hits), Rc::clone(&hits));
    let steps = Collection::new()
        .step(re(r"^I eat (\d+)$"), &[Param::Captures], move |args| {
            specific.borrow_mut().push(format!("digits {}", args.captures()[0]));
        })
        .step(re(r"^I eat (.+)$"), &[Param::Captures], move |args| {
            generic.borrow_mut().push(format!("any {}", args.captures()[0]));
        })
        .step::<_, ()>(re("^never used$"), &[], |_| panic!("never called"));

    let report = Interpreter::new(Vocabulary::english(), steps)
        .run_text(
            "Feature: f\n  Scenario: s\n    When I eat 5\n    And I eat lots",
            "",
        )
        .await;

    assert!(report.success, "{}", report.transcript);
    assert_eq!(*hits.borrow(), ["digits 5", "any lots"]);
}

#[tokio::test]
async fn merged_vocabularies_drive_the_same_steps() {
    let basket = Rc::new(RefCell::new(Basket::default()));
    let mut vocabulary = Vocabulary::english();
    vocabulary.merge(
        Vocabulary::new()
            .with(cornichon::Keyword::Feature, ["Funktionalität"])
            .with(cornichon::Keyword::Scenario, ["Szenario"])
            .with(cornichon::Keyword::Step, ["Angenommen", "Dann"]),
    );

    let report = Interpreter::new(vocabulary, steps(&basket))
        .run_text(
            "Funktionalität: Gurken\n\
             \x20 Szenario: essen\n\
             \x20   Angenommen there are 4 cucumbers\n\
             \x20   Dann I should have 4 cucumbers\n",
            "",
        )
        .await;

    assert!(report.success, "{}", report.transcript);
    assert_eq!(basket.borrow().log, ["start 4", "left 4"]);
}

#[tokio::test]
async fn headers_open_blocks_without_a_colon() {
    let basket = Rc::new(RefCell::new(Basket::default()));

    let report = interpreter(&basket)
        .run_text(
            "Feature: f\n\
             \x20 Background\n\
             \x20   Given the basket is refilled\n\
             \x20 Scenario one\n\
             \x20   Given there are 3 cucumbers\n",
            "",
        )
        .await;

    assert!(report.success, "{}", report.transcript);
    assert_eq!(basket.borrow().log, ["refill", "start 3"]);
    assert_eq!(
        report.transcript,
        "Feature: f\n\
         \x20 Background\n\
         \x20   Given the basket is refilled\n\
         \x20 Scenario one\n\
         \x20   Given the basket is refilled\n\
         \x20   Given there are 3 cucumbers\n",
    );
}
