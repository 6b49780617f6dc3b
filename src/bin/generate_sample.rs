use rust_xlsxwriter::{Format, Workbook};

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }

    fn range(&mut self, lo: u64, hi: u64) -> u64 {
        lo + self.next_u64() % (hi - lo + 1)
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let patients = [
        "Maria Oliveira",
        "João Santos",
        "Ana Costa",
        "Pedro Almeida",
        "Lucia Ferreira",
        "Carlos Pereira",
        "Beatriz Lima",
        "Rafael Souza",
        "Fernanda Ribeiro",
        "Gustavo Martins",
        "Juliana Rocha",
        "Marcos Carvalho",
        "Patrícia Gomes",
        "André Barbosa",
        "Camila Dias",
        "Roberto Nunes",
    ];

    // Specialty, base session price and its professionals.
    let specialties: [(&str, f64, &[&str]); 5] = [
        ("Fisioterapia", 90.0, &["Dr. Silva", "Dra. Mendes"]),
        ("Fonoaudiologia", 110.0, &["Dra. Souza", "Dr. Teixeira"]),
        ("Psicologia", 150.0, &["Dra. Cardoso", "Dr. Moreira", "Dra. Pinto"]),
        ("Terapia Ocupacional", 120.0, &["Dr. Azevedo"]),
        ("Nutrição", 100.0, &["Dra. Freitas", "Dr. Ramos"]),
    ];

    let attendance_types = ["Sessão", "Avaliação", "Reavaliação"];
    let months = ["Janeiro", "Fevereiro", "Março", "Abril", "Maio", "Junho"];

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("guias").expect("Failed to name worksheet");

    let bold = Format::new().set_bold();
    let headers = [
        "Nome Paciente",
        "Número Carteira",
        "Número Guia",
        "Especialidade",
        "Nome Profissional",
        "Tipo Atendimento",
        "Número Sessões",
        "Valor Sessão",
        "Mês",
    ];
    for (col, header) in headers.iter().enumerate() {
        sheet
            .write_string_with_format(0, col as u16, *header, &bold)
            .expect("Failed to write header");
    }

    let mut row: u32 = 1;
    for month in &months {
        let guias_this_month = rng.range(30, 55);
        for _ in 0..guias_this_month {
            let patient = rng.pick(&patients);
            let (specialty, base_price, professionals) = rng.pick(&specialties);
            let professional = rng.pick(professionals);
            let attendance = rng.pick(&attendance_types);
            let sessions = rng.range(1, 20) as f64;
            // Price wobbles ±10% around the specialty base, kept to cents.
            let price = (base_price * (0.9 + 0.2 * rng.next_f64()) * 100.0).round() / 100.0;
            let carteira = rng.range(100_000_000, 999_999_999) as f64;

            sheet.write_string(row, 0, *patient).expect("write failed");
            sheet.write_number(row, 1, carteira).expect("write failed");
            sheet
                .write_string(row, 2, format!("G{:06}", row))
                .expect("write failed");
            sheet.write_string(row, 3, *specialty).expect("write failed");
            sheet
                .write_string(row, 4, *professional)
                .expect("write failed");
            sheet.write_string(row, 5, *attendance).expect("write failed");
            sheet.write_number(row, 6, sessions).expect("write failed");
            sheet.write_number(row, 7, price).expect("write failed");
            sheet.write_string(row, 8, *month).expect("write failed");
            row += 1;
        }
    }

    let output_path = "guias_geap.xlsx";
    workbook.save(output_path).expect("Failed to save workbook");

    println!(
        "Wrote {} guias across {} months to {output_path}",
        row - 1,
        months.len()
    );
}
