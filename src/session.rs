use crate::{ClusterEngine, EngineState, Error, Initialization, KMeansConfig, Point, Primitive, Result};
use std::time::Duration;

pub type ConvergedCallbackFn<'a, T> = Box<dyn FnMut(&StepReport<T>) + 'a>;

/// Snapshot handed to a front end after every step, to re-render centroids and cluster colors.
#[derive(Clone, Debug, PartialEq)]
pub struct StepReport<T: Primitive> {
    pub centroids: Vec<Point<T>>,
    pub assignments: Vec<usize>,
    pub converged: bool,
    pub iteration: usize,
    pub distsum: T,
    /// Set on the single step of a run that first observed convergence
    pub just_converged: bool
}
impl<T: Primitive> StepReport<T> {
    fn from_state(state: &EngineState<T>) -> Self {
        Self {
            centroids: state.centroids.clone(),
            assignments: state.assignments.clone(),
            converged: state.converged,
            iteration: state.iteration,
            distsum: state.distsum,
            just_converged: false
        }
    }
}

/// Outcome of adding a manual seed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedProgress {
    /// More seeds are needed before the run can start
    Collecting { have: usize, need: usize },
    /// All k seeds are present, the engine was initialized
    Ready
}

/// Binds a driving loop to one generation of a [`Session`]. Any reset invalidates outstanding tickets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunTicket {
    generation: u64
}

enum Stage<'a, T: Primitive> {
    Idle,
    Collecting(Vec<Point<T>>),
    Running(ClusterEngine<'a, T>)
}

/// Headless control surface around a [`ClusterEngine`].
///
/// A session owns the dataset, the chosen k and initialization method, and walks through
/// `idle -> (collecting manual seeds) -> running -> converged`. It creates engines lazily, tracks
/// manual seed selection, notifies exactly once per run about convergence, and hands out
/// [`RunTicket`]s so a loop that outlived a reset can not touch the new run.
///
/// ## Example
/// ```rust
/// use stepmeans::*;
/// use rand::prelude::*;
/// use std::time::Duration;
///
/// let mut rnd = StdRng::seed_from_u64(7);
/// let samples: Vec<Point<f64>> = dataset::generate_default(&mut rnd);
/// let conf = KMeansConfig::build().random_generator(rnd).build();
/// let mut session = Session::new(samples, 3, Initialization::KMeansPlusPlus, conf).unwrap()
///     .on_converged(|r| println!("converged after {} iterations", r.iteration));
/// let last = session.run_to_convergence(Duration::ZERO, |r| println!("distsum: {}", r.distsum)).unwrap();
/// assert!(last.converged);
/// ```
pub struct Session<'a, T: Primitive> {
    dataset: Vec<Point<T>>,
    k: usize,
    init: Initialization<T>,
    config: KMeansConfig<'a, T>,
    stage: Stage<'a, T>,
    generation: u64,
    notified: bool,
    notifier: ConvergedCallbackFn<'a, T>
}
impl<'a, T: Primitive> Session<'a, T> {
    /// Create a new session. With [`Initialization::Manual`], the session starts collecting seeds; seeds
    /// already contained in the variant are added right away (at most k of them).
    pub fn new(dataset: Vec<Point<T>>, k: usize, init: Initialization<T>, config: KMeansConfig<'a, T>) -> Result<Self> {
        if k < 1 {
            return Err(Error::InvalidClusterCount { k });
        }
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        let manual_seeds = match &init {
            Initialization::Manual(seeds) => Some(seeds.clone()),
            _ => None
        };
        let mut session = Self {
            dataset, k, init,
            config,
            stage: Stage::Idle,
            generation: 0,
            notified: false,
            notifier: Box::new(|r: &StepReport<T>| log::info!("k-means has converged after {} iterations", r.iteration))
        };
        if let Some(seeds) = manual_seeds {
            session.begin_manual();
            for s in seeds.into_iter().take(k) {
                session.add_seed(s)?;
            }
        }
        Ok(session)
    }

    /// Set the callback invoked once per run, on the step that first observes convergence.
    pub fn on_converged<F: FnMut(&StepReport<T>) + 'a>(mut self, notifier: F) -> Self {
        self.notifier = Box::new(notifier); self
    }

    pub fn dataset(&self) -> &[Point<T>] { &self.dataset }

    pub fn k(&self) -> usize { self.k }

    pub fn initialization(&self) -> &Initialization<T> { &self.init }

    pub fn generation(&self) -> u64 { self.generation }

    /// Ticket for the current generation, to be passed to [`Session::step_with`].
    pub fn ticket(&self) -> RunTicket {
        RunTicket { generation: self.generation }
    }

    /// The engine of the current run, if one was started.
    pub fn engine(&self) -> Option<&ClusterEngine<'a, T>> {
        match &self.stage {
            Stage::Running(engine) => Some(engine),
            _ => None
        }
    }

    /// Manual seeds selected so far; empty when not collecting.
    pub fn seeds(&self) -> &[Point<T>] {
        match &self.stage {
            Stage::Collecting(seeds) => seeds.as_slice(),
            _ => &[]
        }
    }

    pub fn is_collecting(&self) -> bool { matches!(self.stage, Stage::Collecting(_)) }

    pub fn has_converged(&self) -> bool {
        self.engine().map(|e| e.has_converged()).unwrap_or(false)
    }

    fn invalidate(&mut self) {
        self.generation += 1;
        self.stage = Stage::Idle;
        self.notified = false;
    }

    /// Drop the current run (engine, seeds and convergence notice), keeping dataset, k and method.
    pub fn reset(&mut self) {
        if self.init.is_manual() {
            self.init = Initialization::Manual(Vec::new());
        }
        self.invalidate();
        log::debug!("session reset, generation {}", self.generation);
    }

    /// Replace the dataset and reset.
    pub fn regenerate(&mut self, dataset: Vec<Point<T>>) -> Result<()> {
        if dataset.is_empty() {
            return Err(Error::EmptyDataset);
        }
        self.dataset = dataset;
        self.reset();
        Ok(())
    }

    /// Change k and the initialization method, then reset. Choosing the manual method starts seed collection.
    pub fn reconfigure(&mut self, k: usize, init: Initialization<T>) -> Result<()> {
        if k < 1 {
            return Err(Error::InvalidClusterCount { k });
        }
        self.k = k;
        if init.is_manual() {
            self.begin_manual();
        } else {
            self.init = init;
            self.reset();
        }
        Ok(())
    }

    /// Switch to manual initialization and start collecting seeds from scratch.
    pub fn begin_manual(&mut self) {
        self.init = Initialization::Manual(Vec::new());
        self.invalidate();
        self.stage = Stage::Collecting(Vec::with_capacity(self.k));
    }

    /// Add one manual seed. Once k seeds are present, the engine is initialized from them.
    pub fn add_seed(&mut self, seed: Point<T>) -> Result<SeedProgress> {
        let seeds = match &mut self.stage {
            Stage::Collecting(seeds) => seeds,
            _ => return Err(Error::NotCollecting)
        };
        seeds.push(seed);
        if seeds.len() < self.k {
            return Ok(SeedProgress::Collecting { have: seeds.len(), need: self.k });
        }
        let init = Initialization::Manual(std::mem::take(seeds));
        let engine = ClusterEngine::new(self.dataset.clone(), self.k, &init, &self.config)?;
        self.init = init;
        self.stage = Stage::Running(engine);
        Ok(SeedProgress::Ready)
    }

    /// Create the engine of this run without iterating, so the initial centroids can be shown.
    pub fn initialize(&mut self) -> Result<&EngineState<T>> {
        Ok(self.running_engine()?.state())
    }

    fn running_engine(&mut self) -> Result<&mut ClusterEngine<'a, T>> {
        if let Stage::Idle = self.stage {
            if self.init.is_manual() {
                return Err(Error::SeedsIncomplete { have: 0, need: self.k });
            }
            let engine = ClusterEngine::new(self.dataset.clone(), self.k, &self.init, &self.config)?;
            self.stage = Stage::Running(engine);
        }
        match &mut self.stage {
            Stage::Running(engine) => Ok(engine),
            Stage::Collecting(seeds) => Err(Error::SeedsIncomplete { have: seeds.len(), need: self.k }),
            Stage::Idle => Err(Error::SeedsIncomplete { have: 0, need: self.k })
        }
    }

    /// Advance the current run by one iteration, creating the engine first if needed.
    /// Once converged, the last state is returned without iterating again.
    pub fn step(&mut self) -> Result<StepReport<T>> {
        self.step_with(self.ticket())
    }

    /// Like [`Session::step`], but refuses to act on behalf of a loop started before the last reset.
    pub fn step_with(&mut self, ticket: RunTicket) -> Result<StepReport<T>> {
        if ticket.generation != self.generation {
            return Err(Error::StaleRun { ticket: ticket.generation, current: self.generation });
        }
        let engine = self.running_engine()?;
        if engine.has_converged() {
            return Ok(StepReport::from_state(engine.state()));
        }
        let mut report = StepReport::from_state(engine.iterate());
        if report.converged && !self.notified {
            self.notified = true;
            report.just_converged = true;
            (self.notifier)(&report);
        }
        Ok(report)
    }

    /// Step until convergence, sleeping `delay` between steps and handing every report to `on_step`.
    /// Stops early after [`KMeansConfig::max_steps`] steps, if set.
    /// ## Returns
    /// The report of the last step taken.
    pub fn run_to_convergence<F: FnMut(&StepReport<T>)>(&mut self, delay: Duration, mut on_step: F) -> Result<StepReport<T>> {
        let ticket = self.ticket();
        let mut steps = 0;
        loop {
            let report = self.step_with(ticket)?;
            steps += 1;
            on_step(&report);
            if report.converged {
                return Ok(report);
            }
            if self.config.max_steps.map(|max| steps >= max).unwrap_or(false) {
                log::warn!("stopping after {} steps without convergence", steps);
                return Ok(report);
            }
            if !delay.is_zero() {
                std::thread::sleep(delay);
            }
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::helpers::testing;
    use crate::points;
    use rand::prelude::*;
    use std::cell::Cell;

    fn manual_session<'a>(notices: &'a Cell<usize>) -> Session<'a, f64> {
        Session::new(testing::two_pairs(), 2, Initialization::Manual(Vec::new()), testing::seeded_config(1))
            .unwrap()
            .on_converged(move |_| notices.set(notices.get() + 1))
    }

    #[test]
    fn rejects_invalid_setup() {
        let conf = testing::seeded_config::<f64>(1);
        assert_eq!(Session::new(testing::two_pairs(), 0, Initialization::RandomSample, conf).err(),
            Some(Error::InvalidClusterCount { k: 0 }));
        let conf = testing::seeded_config::<f64>(1);
        assert_eq!(Session::new(Vec::new(), 2, Initialization::RandomSample, conf).err(), Some(Error::EmptyDataset));
    }

    #[test]
    fn manual_seed_collection() {
        let notices = Cell::new(0);
        let mut session = manual_session(&notices);
        assert!(session.is_collecting());
        assert_eq!(session.step().unwrap_err(), Error::SeedsIncomplete { have: 0, need: 2 });
        assert_eq!(session.add_seed(Point::new(0.0, 0.0)).unwrap(), SeedProgress::Collecting { have: 1, need: 2 });
        assert_eq!(session.seeds(), &[Point::new(0.0, 0.0)]);
        assert!(session.engine().is_none());
        assert_eq!(session.step().unwrap_err(), Error::SeedsIncomplete { have: 1, need: 2 });

        assert_eq!(session.add_seed(Point::new(10.0, 10.0)).unwrap(), SeedProgress::Ready);
        assert!(!session.is_collecting());
        assert_eq!(session.engine().unwrap().assignments(), &[0, 0, 1, 1]);
        assert_eq!(session.add_seed(Point::new(5.0, 5.0)).unwrap_err(), Error::NotCollecting);

        let first = session.step().unwrap();
        assert!(!first.converged && !first.just_converged);
        let second = session.step().unwrap();
        assert!(second.converged && second.just_converged);
        assert_eq!(second.assignments, vec![0, 0, 1, 1]);
        assert_eq!(notices.get(), 1);

        // Further steps neither iterate nor notify again
        let third = session.step().unwrap();
        assert!(third.converged && !third.just_converged);
        assert_eq!(third.iteration, second.iteration);
        assert_eq!(notices.get(), 1);
    }

    #[test]
    fn manual_seeds_given_upfront() {
        let seeds = points(&[(0.0, 0.0), (10.0, 10.0)]);
        let mut session = Session::new(testing::two_pairs::<f64>(), 2, Initialization::Manual(seeds.clone()), testing::seeded_config(1)).unwrap();
        assert_eq!(session.initialize().unwrap().centroids, seeds);
        assert_eq!(session.initialization(), &Initialization::Manual(seeds));
    }

    #[test]
    fn lazy_engine_for_random_strategies() {
        let mut session = Session::new(testing::blobs::<f64>(3, 10), 3, Initialization::FarthestFirst, testing::seeded_config(2)).unwrap();
        assert!(session.engine().is_none());
        let report = session.step().unwrap();
        assert_eq!(report.iteration, 1);
        assert_eq!(report.centroids.len(), 3);
        assert!(session.engine().is_some());
    }

    #[test]
    fn initialize_without_iterating() {
        let mut session = Session::new(testing::blobs::<f64>(3, 10), 2, Initialization::KMeansPlusPlus, testing::seeded_config(2)).unwrap();
        let state = session.initialize().unwrap().clone();
        assert_eq!(state.iteration, 0);
        assert_eq!(session.step().unwrap().iteration, 1);
    }

    #[test]
    fn run_to_convergence_notifies_once() {
        let notices = Cell::new(0);
        let mut session = Session::new(testing::blobs::<f64>(12, 20), 3, Initialization::KMeansPlusPlus, testing::seeded_config(4))
            .unwrap()
            .on_converged(|_| notices.set(notices.get() + 1));
        let mut steps = 0;
        let last = session.run_to_convergence(Duration::ZERO, |_| steps += 1).unwrap();
        assert!(last.converged && last.just_converged);
        assert_eq!(last.iteration, steps);
        assert_eq!(notices.get(), 1);

        // Already converged: a single report, no new notice
        let mut steps = 0;
        let again = session.run_to_convergence(Duration::ZERO, |_| steps += 1).unwrap();
        assert_eq!(steps, 1);
        assert!(again.converged && !again.just_converged);
        assert_eq!(notices.get(), 1);
    }

    #[test]
    fn run_to_convergence_respects_max_steps() {
        let conf = KMeansConfig::build().random_generator(StdRng::seed_from_u64(4)).max_steps(1).build();
        let mut session = Session::new(testing::blobs::<f64>(12, 20), 3, Initialization::RandomSample, conf).unwrap();
        let mut steps = 0;
        let last = session.run_to_convergence(Duration::ZERO, |_| steps += 1).unwrap();
        assert_eq!(steps, 1);
        assert_eq!(last.iteration, 1);
    }

    #[test]
    fn stale_ticket_is_rejected() {
        let mut session = Session::new(testing::blobs::<f64>(1, 10), 2, Initialization::RandomSample, testing::seeded_config(3)).unwrap();
        let ticket = session.ticket();
        session.step_with(ticket).unwrap();
        session.regenerate(testing::two_pairs()).unwrap();
        assert_eq!(session.step_with(ticket).unwrap_err(), Error::StaleRun { ticket: 0, current: 1 });
        assert!(session.engine().is_none());
        assert!(session.step_with(session.ticket()).is_ok());
    }

    #[test]
    fn reset_leaves_no_residual_state() {
        let notices = Cell::new(0);
        let mut session = Session::new(testing::blobs::<f64>(5, 10), 3, Initialization::KMeansPlusPlus, testing::seeded_config(8))
            .unwrap()
            .on_converged(|_| notices.set(notices.get() + 1));
        session.run_to_convergence(Duration::ZERO, |_| {}).unwrap();
        assert_eq!(notices.get(), 1);

        session.regenerate(testing::two_pairs()).unwrap();
        assert!(session.engine().is_none());
        assert!(!session.has_converged());
        let report = session.step().unwrap();
        assert_eq!(report.iteration, 1);
        assert_eq!(report.assignments.len(), 4);
        session.run_to_convergence(Duration::ZERO, |_| {}).unwrap();
        // A fresh run notifies again
        assert_eq!(notices.get(), 2);
    }

    #[test]
    fn reset_in_manual_mode_requires_new_seeds() {
        let notices = Cell::new(0);
        let mut session = manual_session(&notices);
        session.add_seed(Point::new(0.0, 0.0)).unwrap();
        session.add_seed(Point::new(10.0, 10.0)).unwrap();
        session.reset();
        assert_eq!(session.initialization(), &Initialization::Manual(Vec::new()));
        assert_eq!(session.step().unwrap_err(), Error::SeedsIncomplete { have: 0, need: 2 });
        assert_eq!(session.add_seed(Point::new(1.0, 1.0)).unwrap_err(), Error::NotCollecting);
        session.begin_manual();
        assert_eq!(session.add_seed(Point::new(1.0, 1.0)).unwrap(), SeedProgress::Collecting { have: 1, need: 2 });
    }

    #[test]
    fn reconfigure_switches_strategy() {
        let mut session = Session::new(testing::two_pairs::<f64>(), 2, Initialization::RandomSample, testing::seeded_config(1)).unwrap();
        session.step().unwrap();
        session.reconfigure(3, Initialization::Manual(Vec::new())).unwrap();
        assert!(session.is_collecting());
        assert_eq!(session.k(), 3);
        session.reconfigure(1, Initialization::FarthestFirst).unwrap();
        assert!(!session.is_collecting());
        assert_eq!(session.step().unwrap().centroids.len(), 1);
        assert_eq!(session.reconfigure(0, Initialization::FarthestFirst).unwrap_err(), Error::InvalidClusterCount { k: 0 });
    }
}
