use bi_ring::Ring;
use criterion::{black_box, criterion_group, criterion_main, Criterion};

const NODES: usize = 1024;

fn push_pop_churn(c: &mut Criterion) {
    c.bench_function("push_front_pop_front_1024", |b| {
        b.iter(|| {
            let mut ring: Ring<usize, usize> = Ring::with_capacity(NODES);
            for n in 0..NODES {
                ring.push_front(black_box(n), n);
            }
            while !ring.is_empty() {
                ring.pop_front();
            }
            ring
        })
    });
}

fn mid_ring_splice(c: &mut Criterion) {
    c.bench_function("insert_erase_mid_ring", |b| {
        let mut ring: Ring<usize, usize> = (0..NODES).map(|n| (n, n)).collect();
        let mut mid = ring.begin();
        for _ in 0..NODES / 2 {
            mid = ring.next(mid);
        }
        b.iter(|| {
            let at = ring.insert(mid, black_box(NODES), NODES);
            ring.erase(at)
        })
    });
}

fn linear_find(c: &mut Criterion) {
    c.bench_function("find_back_of_1024", |b| {
        let ring: Ring<usize, usize> = (0..NODES).map(|n| (n, n)).collect();
        let needle = NODES - 1;
        b.iter(|| ring.find(black_box(&needle)))
    });
}

criterion_group!(benches, push_pop_churn, mid_ring_splice, linear_find);
criterion_main!(benches);
