fn main() -> anyhow::Result<()> {
    vocab_srs::run()
}
