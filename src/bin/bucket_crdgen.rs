use kube::CustomResourceExt;

fn main() {
    print!(
        "{}",
        serde_yaml::to_string(&s3_bucket_operator::resources::buckets::Bucket::crd()).unwrap()
    )
}
