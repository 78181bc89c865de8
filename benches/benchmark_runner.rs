/// Benchmark runner for the code-tree evaluator.
///
/// Each program is read once and then run repeatedly in fresh contexts, so
/// the timings cover evaluation only.

extern crate jack;

use jack::parser::ast::CodeNode;
use jack::runner::ds::value::{JackValue, NumberType};
use jack::runner::plugin::types::EvalContext;
use std::time::{Duration, Instant};

fn read_program(name: &str, code: &str) -> (EvalContext, Vec<CodeNode>) {
    let ctx = EvalContext::new();
    let codes = ctx
        .parse(code)
        .unwrap_or_else(|e| panic!("Failed to parse benchmark {}: {}", name, e));
    (ctx, codes)
}

/// Run a benchmark and return the execution time.
fn run_benchmark(name: &str, code: &str, iterations: u32) -> Duration {
    let (mut ctx, codes) = read_program(name, code);

    let start = Instant::now();

    for _ in 0..iterations {
        let _ = ctx.run_program(&codes);
    }

    start.elapsed()
}

/// Get the result of running code.
fn run_and_get_result(code: &str) -> JackValue {
    let (mut ctx, codes) = read_program("verification", code);
    ctx.run_program(&codes).unwrap_or(JackValue::Null)
}

// ============================================================================
// Benchmark definitions
// ============================================================================

const BENCH_FIBONACCI: &str = r#"
(@vars n a b temp)
(@assign n 20)
(@assign a 0)
(@assign b 1)
(@for (@call range n) [i]
    (@assign temp a)
    (@assign a b)
    (@assign b (@add temp b)))
a
"#;

const BENCH_LOOP_SUM: &str = r#"
(@vars sum i)
(@assign sum 0)
(@assign i 0)
(@while (@lt i 10000)
    (@assign sum (@add sum i))
    (@assign i (@add i 1)))
sum
"#;

const BENCH_NESTED_LOOPS: &str = r#"
(@vars count)
(@assign count 0)
(@for (@call range 100) [i]
    (@for (@call range 100) [j]
        (@assign count (@add count 1))))
count
"#;

const BENCH_FACTORIAL: &str = r#"
(@vars fact)
(@assign fact (@fn
    (@params n)
    (@if (@le n 1) (@return 1))
    (@mul n (@call fact (@sub n 1)))))
(@call fact 12)
"#;

const BENCH_PRIME_SIEVE: &str = r#"
(@vars sieve count)
(@assign sieve (@list))
(@assign count 0)
(@for (@call range 100) [i] (@set sieve i true))
(@for (@call range 100) [i]
    (@if (@and (@le 2 i) (@get sieve i))
        [(@assign count (@add count 1))
         (@vars k)
         (@assign k (@mul i i))
         (@while (@lt k 100)
            (@set sieve k false)
            (@assign k (@add k i)))]))
count
"#;

const BENCH_OBJECT_ACCESS: &str = r#"
(@vars o total)
(@assign o (@object "a" 1 "b" 2 "c" 3))
(@assign total 0)
(@for (@call range 300) [i]
    (@for o [k v]
        (@assign total (@add total v))))
total
"#;

const BENCH_GCD: &str = r#"
(@vars result a b temp)
(@assign result 0)
(@for (@call range 100) [k]
    (@assign a 48)
    (@assign b 18)
    (@while (@neq b 0)
        (@assign temp b)
        (@assign b (@mod a b))
        (@assign a temp))
    (@assign result (@add result a)))
result
"#;

fn main() {
    println!("=======================================================");
    println!("  Jack Code-Tree Evaluator - Performance Benchmarks");
    println!("=======================================================\n");

    let benchmarks: Vec<(&str, &str, u32)> = vec![
        ("Fibonacci (n=20)", BENCH_FIBONACCI, 1000),
        ("Loop Sum (10K iterations)", BENCH_LOOP_SUM, 100),
        ("Nested Loops (100x100)", BENCH_NESTED_LOOPS, 100),
        ("Factorial (n=12)", BENCH_FACTORIAL, 5000),
        ("Prime Sieve (<100)", BENCH_PRIME_SIEVE, 200),
        ("Object Iteration (300)", BENCH_OBJECT_ACCESS, 200),
        ("GCD (100 iterations)", BENCH_GCD, 200),
    ];

    println!("{:<30} {:>14} {:>14}", "Benchmark", "Total", "Per run");
    println!("{}", "-".repeat(60));

    let mut total = Duration::ZERO;

    for (name, code, iterations) in &benchmarks {
        let duration = run_benchmark(name, code, *iterations);
        total += duration;
        println!(
            "{:<30} {:>12.2?} {:>12.2?}",
            name,
            duration,
            duration / *iterations
        );
    }

    println!("{}", "-".repeat(60));
    println!("{:<30} {:>12.2?}", "TOTAL", total);

    // Verify correctness
    println!("\n=======================================================");
    println!("  Correctness Verification");
    println!("=======================================================\n");

    let verifications: Vec<(&str, &str, i64)> = vec![
        ("Fibonacci", BENCH_FIBONACCI, 6765),
        ("Loop Sum", BENCH_LOOP_SUM, 49995000),
        ("Nested Loops", BENCH_NESTED_LOOPS, 10000),
        ("Factorial", BENCH_FACTORIAL, 479001600),
        ("Prime Count", BENCH_PRIME_SIEVE, 25),
        ("Object Iteration", BENCH_OBJECT_ACCESS, 1800),
        ("GCD", BENCH_GCD, 600),
    ];

    println!("{:<20} {:>12} {:>12}", "Test", "Expected", "Result");
    println!("{}", "-".repeat(46));

    for (name, code, expected) in verifications {
        let value = match run_and_get_result(code) {
            JackValue::Number(NumberType::Integer(n)) => n,
            _ => -1,
        };
        let status = if value == expected { "✓" } else { "✗" };
        println!("{:<20} {:>12} {:>4} {:>7}", name, expected, status, value);
    }
}
