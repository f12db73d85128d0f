use std::{sync::Arc, thread};

use memocalc::{
    cache::{ExpressionCache, normalize},
    config::EngineConfig,
    error::ErrorKind,
    interpreter::parser::core::Strategy,
};

#[test]
fn mixed_session_statistics() {
    let cache = ExpressionCache::new();

    assert_eq!(cache.evaluate("2 + 3 * 4").unwrap(), 14.0);
    assert_eq!(cache.evaluate("2+3*4").unwrap(), 14.0);
    assert_eq!(cache.evaluate("(2 + 3) * 4").unwrap(), 20.0);
    assert_eq!(cache.evaluate("1 / 0").unwrap_err().kind(), ErrorKind::DivisionByZero);

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.total, 4);
    assert!((stats.hit_rate - 25.0).abs() < f64::EPSILON);
    assert_eq!(stats.entries, 2);
}

#[test]
fn normalization_only_strips_whitespace() {
    assert_eq!(normalize(" 1 +\t2\n"), "1+2");
    assert_eq!(normalize("(1)"), "(1)");
    assert_eq!(normalize("2 3"), "23");

    let cache = ExpressionCache::new();
    assert_eq!(cache.evaluate("2 3").unwrap(), 23.0);
    assert!(cache.contains("23"));
}

#[test]
fn repeated_failures_are_misses_every_time() {
    let cache = ExpressionCache::new();
    for _ in 0..3 {
        assert_eq!(cache.evaluate("(1").unwrap_err().kind(), ErrorKind::ParenMismatch);
    }

    let stats = cache.stats();
    assert_eq!(stats.misses, 3);
    assert_eq!(stats.hits, 0);
    assert!(cache.is_empty());
}

#[test]
fn clear_then_reevaluate_is_a_miss() {
    let cache = ExpressionCache::new();
    cache.evaluate("6/3").unwrap();
    cache.evaluate("6/3").unwrap();
    cache.clear();

    assert!(!cache.contains("6/3"));
    cache.evaluate("6 / 3").unwrap();

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 2);
    assert_eq!(stats.entries, 1);
}

#[test]
fn strategies_fill_the_cache_identically() {
    let inputs = ["1+2*3", "-(4-6)/2", "7/0", "(1", "((2))*((3))"];

    let descent = ExpressionCache::new();
    let shunting =
        ExpressionCache::with_config(EngineConfig::default().with_strategy(Strategy::ShuntingYard));

    for input in inputs {
        let a = descent.evaluate(input);
        let b = shunting.evaluate(input);
        match (a, b) {
            (Ok(x), Ok(y)) => assert_eq!(x, y, "{input}"),
            (Err(x), Err(y)) => assert_eq!(x, y, "{input}"),
            (x, y) => panic!("{input}: {x:?} vs {y:?}"),
        }
    }

    assert_eq!(descent.cached_expressions(), shunting.cached_expressions());
}

#[test]
fn shared_between_threads() {
    const THREADS: u64 = 8;
    const ROUNDS: u64 = 50;
    let expressions: Vec<String> = (1..=10).map(|n| format!("{n} * ({n} + 1) / 2")).collect();

    let cache = Arc::new(ExpressionCache::new());
    let handles: Vec<_> = (0..THREADS).map(|_| {
                                           let cache = Arc::clone(&cache);
                                           let expressions = expressions.clone();
                                           thread::spawn(move || {
                                               for _ in 0..ROUNDS {
                                                   for (i, expression) in
                                                       expressions.iter().enumerate()
                                                   {
                                                       let n = (i + 1) as f64;
                                                       assert_eq!(cache.evaluate(expression)
                                                                       .unwrap(),
                                                                  n * (n + 1.0) / 2.0);
                                                   }
                                               }
                                           })
                                       })
                                       .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    let stats = cache.stats();
    assert_eq!(stats.total, THREADS * ROUNDS * 10);
    assert_eq!(stats.misses, 10);
    assert_eq!(stats.hits, stats.total - 10);
    assert_eq!(stats.entries, 10);
}

#[test]
fn clear_races_with_evaluation() {
    let cache = Arc::new(ExpressionCache::new());

    let worker = {
        let cache = Arc::clone(&cache);
        thread::spawn(move || {
            for _ in 0..200 {
                assert_eq!(cache.evaluate("40+2").unwrap(), 42.0);
            }
        })
    };
    for _ in 0..50 {
        cache.clear();
    }
    worker.join().unwrap();

    let stats = cache.stats();
    assert_eq!(stats.hits + stats.misses, 200);
    assert!(stats.entries <= 1);
}
