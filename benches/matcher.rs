use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use sigscan_rs::{
    matcher, NullListener, ScanContext, ScanEngine, ScanTarget, SignatureDefinition,
    StaticDefinitionProvider, TargetKind, VecTargetSource,
};

const DEFINITIONS: usize = 256;
const TARGETS: usize = 1024;

struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    fn identity(&mut self, segments: usize) -> String {
        let mut out = String::new();
        for i in 0..segments {
            if i > 0 {
                out.push('.');
            }
            for _ in 0..6 {
                let v = (self.next_u64() & 0xff) as u8;
                out.push((b'a' + (v % 26)) as char);
            }
        }
        out
    }
}

fn make_targets(rng: &mut XorShift64, count: usize) -> Vec<ScanTarget> {
    (0..count)
        .map(|_| {
            let name = rng.identity(4);
            let mut hash = [0u8; 20];
            for b in hash.iter_mut() {
                *b = (rng.next_u64() & 0xff) as u8;
            }
            ScanTarget::new(name, hash.to_vec(), 4096, TargetKind(1))
        })
        .collect()
}

/// Mixed definition set: some full identities of real targets (hits),
/// some vendor prefixes, the rest misses.
fn make_definitions(rng: &mut XorShift64, targets: &[ScanTarget]) -> Vec<SignatureDefinition> {
    (0..DEFINITIONS)
        .map(|i| {
            let pattern = match i % 8 {
                0 => targets[i % targets.len()].name.clone(),
                1 => {
                    let name = &targets[i % targets.len()].name;
                    let cut = name.find('.').unwrap_or(name.len());
                    name[..cut].to_string()
                }
                _ => rng.identity(4),
            };
            SignatureDefinition::identity(pattern).build().unwrap()
        })
        .collect()
}

fn bench_evaluate(c: &mut Criterion) {
    let mut rng = XorShift64::new(0x5163_5CA4);
    let targets = make_targets(&mut rng, TARGETS);
    let definitions = make_definitions(&mut rng, &targets);

    let mut group = c.benchmark_group("matcher");
    group.throughput(Throughput::Elements((TARGETS * DEFINITIONS) as u64));
    group.bench_function("evaluate_all_pairs", |b| {
        b.iter(|| {
            let mut hits = 0u64;
            for target in &targets {
                for def in &definitions {
                    if matcher::evaluate(black_box(target), black_box(def)).matched {
                        hits += 1;
                    }
                }
            }
            black_box(hits)
        })
    });
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut rng = XorShift64::new(0x5163_5CA4);
    let targets = make_targets(&mut rng, TARGETS);
    let definitions = make_definitions(&mut rng, &targets);
    let source = VecTargetSource::new(targets);
    let provider = StaticDefinitionProvider::new(definitions);
    let engine = ScanEngine::new();
    let listener = NullListener;

    let mut group = c.benchmark_group("engine");
    group.throughput(Throughput::Elements(TARGETS as u64));
    group.bench_function("full_scan", |b| {
        b.iter(|| {
            let ctx = ScanContext::new(&listener);
            engine.scan(&ctx, &source, &provider).unwrap()
        })
    });
    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_scan);
criterion_main!(benches);
