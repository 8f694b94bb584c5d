use env_logger::Env;
use std::time::Duration;
use stepmeans::*;

fn main() {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let method = std::env::args().nth(1).unwrap_or_else(|| "kmeans++".to_string());
    let k: usize = std::env::args().nth(2).and_then(|v| v.parse().ok()).unwrap_or(3);
    let init: Initialization<f64> = match method.parse() {
        Ok(init) => init,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    if init.is_manual() {
        eprintln!("use the manual_seeds demo for manual initialization");
        std::process::exit(1);
    }

    let samples: Vec<Point<f64>> = dataset::generate_default(&mut rand::thread_rng());
    let conf = KMeansConfig::<f64>::build()
        .iteration_done(&|s, nr, new_distsum|
            println!("Iteration {} - Error: {:.2} -> {:.2} | Improvement: {:.2}",
                nr, s.distsum, new_distsum, s.distsum - new_distsum))
        .max_steps(100)
        .build();

    let mut session = match Session::new(samples, k, init, conf) {
        Ok(session) => session.on_converged(|r| println!("KMeans has converged after {} iterations", r.iteration)),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };
    match session.run_to_convergence(Duration::from_millis(250), |r| println!("Centroids: {:?}", r.centroids)) {
        Ok(result) => println!("Cluster-Assignments: {:?}", result.assignments),
        Err(e) => eprintln!("{}", e)
    }
}
