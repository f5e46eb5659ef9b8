/// Reed-Solomon error correction for ECC200 symbols
/// ECC200 uses RS over GF(256) with primitive polynomial x^8 + x^5 + x^3 + x^2 + 1 (0x12D)
/// and generator roots alpha^1 .. alpha^n
pub struct Gf256;

const PRIMITIVE: u16 = 0x12D;

const fn build_exp_table() -> [u8; 512] {
    let mut exp = [0u8; 512];
    let mut x: u16 = 1;
    let mut i = 0;
    while i < 255 {
        exp[i] = x as u8;
        x <<= 1;
        if x & 0x100 != 0 {
            x ^= PRIMITIVE;
        }
        i += 1;
    }
    while i < 512 {
        exp[i] = exp[i - 255];
        i += 1;
    }
    exp
}

const fn build_log_table() -> [u8; 256] {
    let exp = build_exp_table();
    let mut log = [0u8; 256];
    let mut i = 0;
    while i < 255 {
        log[exp[i] as usize] = i as u8;
        i += 1;
    }
    log
}

static EXP_TABLE: [u8; 512] = build_exp_table();
static LOG_TABLE: [u8; 256] = build_log_table();

impl Gf256 {
    /// Field multiplication
    pub fn mul(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        EXP_TABLE[LOG_TABLE[a as usize] as usize + LOG_TABLE[b as usize] as usize]
    }

    /// Field division; a zero divisor yields 0
    pub fn div(a: u8, b: u8) -> u8 {
        if a == 0 || b == 0 {
            return 0;
        }
        EXP_TABLE[LOG_TABLE[a as usize] as usize + 255 - LOG_TABLE[b as usize] as usize]
    }

    /// alpha^n
    pub fn exp(n: usize) -> u8 {
        EXP_TABLE[n % 255]
    }

    #[cfg(test)]
    fn pow(a: u8, n: usize) -> u8 {
        if a == 0 {
            return if n == 0 { 1 } else { 0 };
        }
        let log_a = LOG_TABLE[a as usize] as usize;
        EXP_TABLE[(log_a * (n % 255)) % 255]
    }

    /// Evaluate an ascending-order polynomial at `x`
    fn eval_ascending(poly: &[u8], x: u8) -> u8 {
        poly.iter()
            .rev()
            .fold(0u8, |acc, &coeff| Gf256::mul(acc, x) ^ coeff)
    }
}

/// Systematic encoder producing the error codewords for one block
pub struct ReedSolomonEncoder {
    /// Generator coefficients below the leading 1, descending order
    generator: Vec<u8>,
}

impl ReedSolomonEncoder {
    /// Encoder appending `num_ecc_codewords` error codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        // g(x) = prod (x - alpha^i), i = 1..=n, kept in descending order
        let mut g = vec![1u8];
        for i in 1..=num_ecc_codewords {
            let root = Gf256::exp(i);
            let mut next = vec![0u8; g.len() + 1];
            for (j, &c) in g.iter().enumerate() {
                next[j] ^= c;
                next[j + 1] ^= Gf256::mul(c, root);
            }
            g = next;
        }
        Self {
            generator: g[1..].to_vec(),
        }
    }

    /// Remainder of data * x^n divided by the generator
    pub fn encode(&self, data: &[u8]) -> Vec<u8> {
        let n = self.generator.len();
        let mut remainder = vec![0u8; n];
        if n == 0 {
            return remainder;
        }
        for &d in data {
            let factor = d ^ remainder[0];
            remainder.rotate_left(1);
            remainder[n - 1] = 0;
            for (r, &g) in remainder.iter_mut().zip(self.generator.iter()) {
                *r ^= Gf256::mul(g, factor);
            }
        }
        remainder
    }
}

/// Reed-Solomon decoder for one interleaved ECC200 block
pub struct ReedSolomonDecoder {
    num_ecc_codewords: usize,
}

impl ReedSolomonDecoder {
    /// Decoder for blocks carrying `num_ecc_codewords` error codewords
    pub fn new(num_ecc_codewords: usize) -> Self {
        Self { num_ecc_codewords }
    }

    /// Correct `received` (data followed by error codewords) in place.
    ///
    /// Returns the number of corrected codewords.
    pub fn decode(&self, received: &mut [u8]) -> Result<usize, &'static str> {
        if received.len() > 255 || received.len() <= self.num_ecc_codewords {
            return Err("Block length out of range");
        }

        let syndrome = self.calculate_syndrome(received);
        if syndrome.iter().all(|&s| s == 0) {
            return Ok(0);
        }

        // Berlekamp-Massey
        let sigma = self.find_error_locator(&syndrome);
        let num_errors = sigma.len() - 1;
        if num_errors == 0 || num_errors * 2 > self.num_ecc_codewords {
            return Err("Too many errors");
        }

        // Chien search
        let error_positions = self.find_error_positions(&sigma, received.len())?;

        // Forney
        let error_values =
            self.find_error_values(&sigma, &syndrome, &error_positions, received.len())?;

        for (&pos, &value) in error_positions.iter().zip(error_values.iter()) {
            received[pos] ^= value;
        }

        if self.calculate_syndrome(received).iter().any(|&s| s != 0) {
            return Err("Uncorrectable error");
        }

        Ok(num_errors)
    }

    fn calculate_syndrome(&self, received: &[u8]) -> Vec<u8> {
        // Descending convention: received[0] is the coefficient of x^(n-1)
        (1..=self.num_ecc_codewords)
            .map(|i| {
                let a = Gf256::exp(i);
                received.iter().fold(0u8, |acc, &c| Gf256::mul(acc, a) ^ c)
            })
            .collect()
    }

    fn find_error_locator(&self, syndrome: &[u8]) -> Vec<u8> {
        let n = syndrome.len();
        let mut sigma = vec![1u8];
        let mut b = vec![1u8];
        let mut delta_b: u8 = 1;
        let mut l = 0;
        let mut m = 1;

        for i in 0..n {
            let mut delta = syndrome[i];
            for j in 1..=l {
                if j < sigma.len() && j <= i {
                    delta ^= Gf256::mul(sigma[j], syndrome[i - j]);
                }
            }

            if delta == 0 {
                m += 1;
                continue;
            }

            let previous = sigma.clone();
            let d = Gf256::div(delta, delta_b);
            if sigma.len() < b.len() + m {
                sigma.resize(b.len() + m, 0);
            }
            // sigma = sigma - d * x^m * b
            for (j, &bj) in b.iter().enumerate() {
                sigma[j + m] ^= Gf256::mul(d, bj);
            }

            if 2 * l <= i {
                b = previous;
                delta_b = delta;
                l = i + 1 - l;
                m = 1;
            } else {
                m += 1;
            }
        }

        while sigma.len() > 1 && sigma.last() == Some(&0) {
            sigma.pop();
        }
        sigma
    }

    /// Root X^-1 of the locator for codeword index `pos` in a block of length `n`
    fn inverse_locator(pos: usize, n: usize) -> u8 {
        Gf256::exp(255 - (n - 1 - pos) % 255)
    }

    fn find_error_positions(&self, sigma: &[u8], n: usize) -> Result<Vec<usize>, &'static str> {
        let positions: Vec<usize> = (0..n)
            .filter(|&pos| Gf256::eval_ascending(sigma, Self::inverse_locator(pos, n)) == 0)
            .collect();

        if positions.len() != sigma.len() - 1 {
            return Err("Wrong number of error positions found");
        }

        Ok(positions)
    }

    fn find_error_values(
        &self,
        sigma: &[u8],
        syndrome: &[u8],
        error_positions: &[usize],
        n: usize,
    ) -> Result<Vec<u8>, &'static str> {
        // omega = syndrome * sigma mod x^(2t)
        let mut omega = vec![0u8; syndrome.len()];
        for i in 0..syndrome.len() {
            for j in 0..=i.min(sigma.len() - 1) {
                omega[i] ^= Gf256::mul(sigma[j], syndrome[i - j]);
            }
        }

        // sigma'(x): odd coefficients shifted down one degree
        let sigma_prime: Vec<u8> = sigma
            .iter()
            .enumerate()
            .skip(1)
            .map(|(i, &c)| if i % 2 == 1 { c } else { 0 })
            .collect();

        error_positions
            .iter()
            .map(|&pos| {
                let x_inv = Self::inverse_locator(pos, n);
                let denominator = Gf256::eval_ascending(&sigma_prime, x_inv);
                if denominator == 0 {
                    return Err("Sigma derivative is zero");
                }
                // First consecutive root alpha^1: e_k = omega(X_k^-1) / sigma'(X_k^-1)
                Ok(Gf256::div(Gf256::eval_ascending(&omega, x_inv), denominator))
            })
            .collect()
    }
}
