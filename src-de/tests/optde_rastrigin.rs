use evobench_de::{DEConfigBuilder, differential_evolution};
use evobench_testfunctions::{get_function_bounds, rastrigin};

#[test]
fn test_de_rastrigin_2d() {
    let config = DEConfigBuilder::new()
        .popsize(30)
        .maxiter(300)
        .mutation(0.5)
        .recombination(0.9)
        .dim(2)
        .bounds((-5.12, 5.12))
        .seed(42)
        .build()
        .unwrap();
    let report = differential_evolution(&rastrigin, config).unwrap();
    assert!(report.fun < 1e-3, "f = {}", report.fun);
    for &actual in report.x.iter() {
        assert!(actual.abs() < 0.1);
    }
}

#[test]
fn test_de_rastrigin_5d() {
    let bounds = get_function_bounds("rastrigin", 5).unwrap();
    let mut results = Vec::new();
    for seed in 100..110 {
        let config = DEConfigBuilder::new()
            .popsize(40)
            .maxiter(400)
            .mutation(0.5)
            .recombination(0.9)
            .dim(bounds.len())
            .bounds(bounds[0])
            .seed(seed)
            .build()
            .unwrap();
        let report = differential_evolution(&rastrigin, config).unwrap();
        // Local minima sit near integer lattice points, each costing about 1 per coordinate
        assert!(report.fun < 4.0, "seed {}: f = {}", seed, report.fun);
        results.push(report.fun);
    }
    let mean = results.iter().sum::<f64>() / results.len() as f64;
    assert!(mean < 2.0, "mean = {}", mean);
}
