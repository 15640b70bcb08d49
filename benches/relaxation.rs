use std::sync::Arc;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use relaxed_heuristics::{
    Action, Domain, Fact, GroundedProblem, Heuristic, HeuristicKind, PlanningContext, State,
};

fn cell(x: usize, y: usize) -> Fact {
    Fact::new("at", [format!("c{x}"), format!("c{y}")]).unwrap()
}

/// Agent on an n×n grid, starting in one corner with the goal in the other.
fn grid(n: usize) -> (Arc<dyn PlanningContext>, State) {
    let mut actions = Vec::new();
    for x in 0..n {
        for y in 0..n {
            let mut step = |tx: usize, ty: usize| {
                actions.push(Action::strips(
                    format!("move-{x}-{y}-{tx}-{ty}"),
                    [cell(x, y)],
                    [cell(tx, ty)],
                    [cell(x, y)],
                ));
            };
            if x + 1 < n {
                step(x + 1, y);
            }
            if y + 1 < n {
                step(x, y + 1);
            }
            if x > 0 {
                step(x - 1, y);
            }
            if y > 0 {
                step(x, y - 1);
            }
        }
    }

    let init = State::new([cell(0, 0)]);
    let problem = GroundedProblem::new(
        Domain::new(actions, vec![]),
        init.clone(),
        vec![cell(n - 1, n - 1), cell(0, n - 1), cell(n - 1, 0)],
    );
    (Arc::new(problem), init)
}

fn bench_heuristics(c: &mut Criterion) {
    let mut group = c.benchmark_group("relaxation/grid");
    for n in [5usize, 10, 20] {
        let (ctx, init) = grid(n);
        for key in ["delete_relaxation/h_add", "delete_relaxation/h_max", "critical_path/2"] {
            let mut h = HeuristicKind::from_key(key).build(Arc::clone(&ctx)).unwrap();
            group.bench_with_input(BenchmarkId::new(key, n), &init, |b, init| {
                b.iter(|| h.compute(init).unwrap());
            });
        }
    }
    group.finish();
}

criterion_group!(benches, bench_heuristics);
criterion_main!(benches);
