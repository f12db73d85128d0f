use memocalc::{cache::ExpressionCache, session::Session};

fn run(cache: &ExpressionCache, input: &str) -> String {
    let mut output = Vec::new();
    Session::new(cache, input.as_bytes(), &mut output).without_prompt()
                                                      .run()
                                                      .unwrap();
    String::from_utf8(output).unwrap()
}

#[test]
fn evaluates_and_reports_statistics() {
    let cache = ExpressionCache::new();
    let out = run(&cache, "2 + 3 * 4\n2+3*4\n(2 + 3\nstats\n");

    assert_eq!(out,
               "Result: 14\n\
                Result: 14\n\
                ParenMismatch: Error at position 0: unclosed parenthesis.\n\
                Cache statistics:\n  \
                hits:     1\n  \
                misses:   2\n  \
                total:    3\n  \
                hit rate: 33.33%\n  \
                entries:  1\n");
}

#[test]
fn lists_clears_and_resets() {
    let cache = ExpressionCache::new();
    let out = run(&cache, "10/4\n-1\ncache\nclear\ncache\nreset\nstats\n");
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[..7],
               ["Result: 2.5",
                "Result: -1",
                "Cache size: 2 entries",
                "  -1 = -1",
                "  10/4 = 2.5",
                "Cache cleared",
                "Cache size: 0 entries"]);
    assert_eq!(lines[7], "Statistics reset");
    assert_eq!(lines[9], "  hits:     0");
    assert_eq!(lines[10], "  misses:   0");
}

#[test]
fn state_survives_across_sessions() {
    let cache = ExpressionCache::new();
    run(&cache, "7*6\n");
    run(&cache, "7 * 6\nexit\n");

    let stats = cache.stats();
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.misses, 1);
}

#[test]
fn precision_only_changes_display() {
    let cache = ExpressionCache::new();
    let mut output = Vec::new();
    Session::new(&cache, "2/3\n".as_bytes(), &mut output).without_prompt()
                                                         .with_precision(Some(4))
                                                         .run()
                                                         .unwrap();

    assert_eq!(String::from_utf8(output).unwrap(), "Result: 0.6667\n");
    assert_eq!(cache.cached_expressions(), vec![("2/3".to_string(), 2.0 / 3.0)]);
}
