use env_logger::Env;
use stepmeans::*;

fn main() -> Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("debug"));

    let samples = points(&[(0.0f64, 0.0), (0.0, 1.0), (10.0, 10.0), (10.0, 11.0), (-8.0, 6.0), (-7.5, 6.5)]);
    let mut session = Session::new(samples, 3, Initialization::Manual(Vec::new()), KMeansConfig::default())?;

    // Seeds arrive one click at a time
    for seed in points(&[(1.0, 1.0), (9.0, 9.0), (-6.0, 5.0)]) {
        match session.add_seed(seed)? {
            SeedProgress::Collecting { have, need } => println!("selected {} of {} centroids", have, need),
            SeedProgress::Ready => println!("all centroids selected"),
        }
    }

    loop {
        let report = session.step()?;
        println!("Iteration {}: centroids {:?} assignments {:?}", report.iteration, report.centroids, report.assignments);
        if report.converged {
            break;
        }
    }
    Ok(())
}
