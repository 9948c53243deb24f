use evobench_de::{
    DEConfigBuilder, GradientDescentConfigBuilder, differential_evolution, gradient_descent,
};
use evobench_testfunctions::rosenbrock;

fn mean_and_variance(v: &[f64]) -> (f64, f64) {
    let n = v.len() as f64;
    let mean = v.iter().sum::<f64>() / n;
    let var = v.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / n;
    (mean, var)
}

#[test]
fn test_de_rosenbrock_2d() {
    let config = DEConfigBuilder::new()
        .popsize(20)
        .maxiter(300)
        .dim(2)
        .bounds((-2.048, 2.048))
        .seed(42)
        .build()
        .unwrap();
    let report = differential_evolution(&rosenbrock, config).unwrap();
    assert!(report.fun < 1e-2, "f = {}", report.fun);

    // Check that solution is close to global optimum (1, 1)
    for &actual in report.x.iter() {
        assert!((actual - 1.0).abs() < 0.2, "x = {}", report.x);
    }
}

#[test]
fn test_de_vs_gradient_descent_on_rosenbrock() {
    let mut de_results = Vec::new();
    let mut gd_results = Vec::new();
    for seed in 0..10 {
        let de = DEConfigBuilder::new()
            .popsize(20)
            .maxiter(300)
            .mutation(0.8)
            .recombination(0.9)
            .dim(2)
            .bounds((-2.048, 2.048))
            .seed(seed)
            .build()
            .unwrap();
        de_results.push(differential_evolution(&rosenbrock, de).unwrap().fun);

        let gd = GradientDescentConfigBuilder::new()
            .popsize(20)
            .learning_rate(0.005)
            .maxiter(300)
            .dim(2)
            .bounds((-2.048, 2.048))
            .seed(seed)
            .build()
            .unwrap();
        gd_results.push(gradient_descent(&rosenbrock, gd).unwrap().fun);
    }

    let (de_mean, de_var) = mean_and_variance(&de_results);
    let (gd_mean, gd_var) = mean_and_variance(&gd_results);
    assert!(de_mean < 1e-2, "de mean = {}", de_mean);
    assert!(de_mean < gd_mean, "de mean {} vs gd mean {}", de_mean, gd_mean);
    assert!(de_var < gd_var, "de variance {} vs gd variance {}", de_var, gd_var);
}
