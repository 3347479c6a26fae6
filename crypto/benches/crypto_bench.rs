use criterion::{black_box, criterion_group, criterion_main, Criterion};

use weave_crypto::{
    hash_leaf, keypair_from_seed, sign_attestation, verify_attestation, verify_proof,
    AttestationDomain, MerkleTree,
};
use weave_types::{KycHash, MemberAddress, NetworkId};

fn members(n: u64) -> Vec<MemberAddress> {
    (0..n)
        .map(|i| MemberAddress::new(format!("weav_{:040x}", i)))
        .collect()
}

fn merkle_build_bench(c: &mut Criterion) {
    let set = members(1024);

    c.bench_function("merkle_build_1024", |b| {
        b.iter(|| MerkleTree::from_members(black_box(&set)))
    });
}

fn merkle_verify_bench(c: &mut Criterion) {
    let set = members(1024);
    let tree = MerkleTree::from_members(&set);
    let root = tree.root();
    let leaf = hash_leaf(&set[317]);
    let proof = tree.proof(317).unwrap();

    c.bench_function("merkle_verify_1024", |b| {
        b.iter(|| verify_proof(black_box(&root), black_box(leaf), black_box(&proof)))
    });
}

fn attestation_verify_bench(c: &mut Criterion) {
    let authority = keypair_from_seed(&[9u8; 32]);
    let domain = AttestationDomain::new(NetworkId::Dev);
    let att = sign_attestation(
        &domain,
        MemberAddress::new(format!("weav_{:040x}", 3u32)),
        KycHash::new([3u8; 32]),
        &authority.private,
    );

    c.bench_function("attestation_verify", |b| {
        b.iter(|| verify_attestation(black_box(&att), &domain, &authority.public))
    });
}

criterion_group!(
    benches,
    merkle_build_bench,
    merkle_verify_bench,
    attestation_verify_bench
);
criterion_main!(benches);
