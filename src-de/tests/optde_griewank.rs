use evobench_de::{DEConfigBuilder, differential_evolution};
use evobench_testfunctions::{get_function_domain, griewank};

#[test]
fn test_de_griewank_5d() {
    let bounds = get_function_domain("griewank").unwrap();
    for seed in 100..105 {
        let config = DEConfigBuilder::new()
            .popsize(40)
            .maxiter(400)
            .mutation(0.5)
            .recombination(0.9)
            .dim(5)
            .bounds(bounds)
            .seed(seed)
            .build()
            .unwrap();
        let report = differential_evolution(&griewank, config).unwrap();
        assert!(report.fun < 0.3, "seed {}: f = {}", seed, report.fun);
        assert!(report.fun >= 0.0);
    }
}

#[test]
fn test_de_griewank_2d() {
    let config = DEConfigBuilder::new()
        .popsize(40)
        .maxiter(300)
        .mutation(0.5)
        .recombination(0.9)
        .dim(2)
        .bounds((-600.0, 600.0))
        .seed(42)
        .build()
        .unwrap();
    let report = differential_evolution(&griewank, config).unwrap();
    assert!(report.fun < 0.05, "f = {}", report.fun);
}
